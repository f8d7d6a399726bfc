use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("clients must be greater than 0")]
    ClientsZero,
    #[error("counters must be greater than 0")]
    CountersZero,
    #[error("arrival rate must be > 0 (got {0})")]
    InvalidArrivalRate(f64),
    #[error("service rate must be > 0 (got {0})")]
    InvalidServiceRate(f64),
    #[error("compare list must not be empty")]
    EmptyCompareList,
    #[error("compare list must not contain empty entries")]
    EmptyCompareEntry,
    #[error("invalid counter count '{0}' in compare list")]
    InvalidCompareEntry(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    ReportIo(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp;

use crate::error::{Error, Result};

/// Exponential sampler for one scenario's interarrival and service times.
///
/// Owns its generator, so scenarios never share a random stream.
pub struct ExpSampler {
    rng: StdRng,
    arrivals: Exp<f64>,
    service: Exp<f64>,
}

impl ExpSampler {
    pub fn new(arrival_rate: f64, service_rate: f64, seed: Option<u64>) -> Result<Self> {
        if !is_valid_rate(arrival_rate) {
            return Err(Error::InvalidArrivalRate(arrival_rate));
        }
        if !is_valid_rate(service_rate) {
            return Err(Error::InvalidServiceRate(service_rate));
        }
        let arrivals =
            Exp::new(arrival_rate).map_err(|_| Error::InvalidArrivalRate(arrival_rate))?;
        let service =
            Exp::new(service_rate).map_err(|_| Error::InvalidServiceRate(service_rate))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            rng,
            arrivals,
            service,
        })
    }

    pub fn interarrival(&mut self) -> f64 {
        self.rng.sample(self.arrivals)
    }

    pub fn service_time(&mut self) -> f64 {
        self.rng.sample(self.service)
    }

    /// Arrival timestamps for `count` clients, accumulated from interarrival gaps.
    pub fn arrival_times(&mut self, count: usize) -> Vec<f64> {
        let mut time = 0.0;
        (0..count)
            .map(|_| {
                time += self.interarrival();
                time
            })
            .collect()
    }
}

pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

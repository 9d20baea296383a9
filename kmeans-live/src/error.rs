use thiserror::Error;

/// Result alias for `kmeans_live`.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors returned by the clustering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    /// `k` is zero or larger than the population.
    #[error("cannot create {requested} clusters from {population} points")]
    InvalidConfiguration { requested: usize, population: usize },

    /// `step` was called before `initialize`.
    #[error("engine is not initialized, call initialize(k) before step()")]
    PrematureOperation,

    /// A point was not where the partition said it should be.
    /// Never expected in a correct run; the caller should stop.
    #[error("partition invariant broken: point {point} is not a member of cluster {cluster}")]
    InvariantViolation { point: usize, cluster: usize },
}

impl ClusterError {
    /// Logic faults are fatal, the other variants are caller mistakes.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClusterError::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = ClusterError::InvalidConfiguration {
            requested: 5,
            population: 3,
        };
        assert_eq!(e.to_string(), "cannot create 5 clusters from 3 points");
        let e = ClusterError::InvariantViolation {
            point: 7,
            cluster: 1,
        };
        assert!(e.to_string().contains("point 7"));
    }

    #[test]
    fn only_invariant_violation_is_fatal() {
        let broken = ClusterError::InvariantViolation {
            point: 0,
            cluster: 0,
        };
        let bad_k = ClusterError::InvalidConfiguration {
            requested: 0,
            population: 1,
        };
        assert!(broken.is_fatal());
        assert!(!ClusterError::PrematureOperation.is_fatal());
        assert!(!bad_k.is_fatal());
    }
}

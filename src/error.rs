use thiserror::Error;

/// Error type of the underlying provider call (SDK error or a test double).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SweepError {
    // fatal: the run stops before any bucket is touched
    #[error("no credentials could be resolved for profile '{profile}'")]
    NoCredentials {
        profile: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to describe regions")]
    DescribeRegions(#[source] BoxError),

    // regional: the remaining regions are still handled
    #[error("failed to list buckets in region {region}")]
    ListBuckets {
        region: String,
        #[source]
        source: BoxError,
    },

    // per bucket
    #[error("failed to list objects of bucket {bucket}")]
    ListObjects {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to delete object '{key}' from bucket {bucket}")]
    DeleteObject {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to delete bucket {bucket}")]
    DeleteBucket {
        bucket: String,
        #[source]
        source: BoxError,
    },
}

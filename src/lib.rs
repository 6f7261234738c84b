//! Sweep an AWS account clean of S3 buckets: every bucket whose name does not contain one
//! of the exclusion substrings is emptied and deleted, region by region.

pub mod client;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod regions;
pub mod s3_aux;
pub mod sweeper;

#[cfg(test)]
mod testing;

pub use client::AwsSession;
pub use config::SweepConfig;
pub use error::SweepError;
pub use exclusion::ExclusionSet;
pub use regions::{Ec2Regions, RegionSource};
pub use s3_aux::{BucketStore, ObjectListing, S3BucketStore, StoreProvider};
pub use sweeper::{empty_bucket, sweep_all, sweep_bucket, sweep_region, BucketOutcome, SweepReport};

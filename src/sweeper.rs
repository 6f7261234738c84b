use std::collections::{BTreeMap, BTreeSet};

use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, error, info, warn, Level};

use crate::error::SweepError;
use crate::exclusion::ExclusionSet;
use crate::regions::RegionSource;
use crate::s3_aux::{BucketStore, StoreProvider};


/// What happened to a single bucket.
#[derive(Debug)]
pub enum BucketOutcome {
    Excluded,
    Deleted { objects: usize },
    /// emptying failed, so the bucket itself was left alone
    EmptyFailed(SweepError),
    DeleteFailed { objects: usize, error: SweepError },
}

impl BucketOutcome {

    /// console lines for this outcome, in print order
    fn progress_lines(&self, bucket_name: &str, region: &str) -> Vec<(Level, String)> {
        let emptied = || (Level::INFO, format!("Emptied bucket: {bucket_name} in region {region}"));
        match self {
            BucketOutcome::Excluded => {
                vec![(Level::INFO, format!("Excluded bucket: {bucket_name} in region {region}"))]
            }
            BucketOutcome::Deleted { .. } => vec![
                emptied(),
                (Level::INFO, format!("Deleted bucket: {bucket_name} in region {region}")),
            ],
            BucketOutcome::EmptyFailed(err) => vec![(
                Level::ERROR,
                format!("Failed to empty bucket {bucket_name} in region {region}: {}", DisplayErrorContext(err)),
            )],
            BucketOutcome::DeleteFailed { error, .. } => vec![
                emptied(),
                (
                    Level::ERROR,
                    format!("Failed to delete bucket {bucket_name} in region {region}: {}", DisplayErrorContext(error)),
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketFailure {
    pub region: String,
    pub bucket: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct SweepReport {
    pub regions_visited: usize,
    pub deleted: Vec<String>,
    pub excluded: BTreeSet<String>,
    pub objects_deleted: usize,
    pub failures: Vec<BucketFailure>,
    /// regions for which the bucket listing failed, with the error
    pub failed_regions: Vec<(String, String)>,
}

impl SweepReport {

    /// a bucket is settled once it was deleted or found excluded; later regions skip it
    pub fn is_settled(&self, bucket_name: &str) -> bool {
        self.excluded.contains(bucket_name) || self.deleted.iter().any(|b| b == bucket_name)
    }

    /// The last failure of every bucket that was never deleted, one entry per bucket.
    /// `failures` keeps every attempt; a bucket that stays unsettled fails again in each region.
    pub fn remaining_failures(&self) -> Vec<&BucketFailure> {
        let mut latest: BTreeMap<&str, &BucketFailure> = BTreeMap::new();
        for failure in &self.failures {
            latest.insert(failure.bucket.as_str(), failure);
        }
        latest
            .into_values()
            .filter(|f| !self.deleted.contains(&f.bucket))
            .collect()
    }

    fn record(&mut self, region: &str, bucket_name: &str, outcome: BucketOutcome) {
        let failure = |err: &SweepError| BucketFailure {
            region: region.to_owned(),
            bucket: bucket_name.to_owned(),
            message: DisplayErrorContext(err).to_string(),
        };
        match outcome {
            BucketOutcome::Excluded => {
                self.excluded.insert(bucket_name.to_owned());
            }
            BucketOutcome::Deleted { objects } => {
                self.objects_deleted += objects;
                self.deleted.push(bucket_name.to_owned());
            }
            BucketOutcome::EmptyFailed(err) => self.failures.push(failure(&err)),
            BucketOutcome::DeleteFailed { objects, error } => {
                self.objects_deleted += objects;
                self.failures.push(failure(&error));
            }
        }
    }

    pub fn log_summary(&self) {
        info!(
            "Sweep finished: {} regions, {} buckets deleted ({} objects), {} excluded",
            self.regions_visited,
            self.deleted.len(),
            self.objects_deleted,
            self.excluded.len()
        );
        for (region, msg) in &self.failed_regions {
            warn!("Region {region} was skipped: {msg}");
        }
        for failure in self.remaining_failures() {
            warn!("Bucket {} was not deleted (last attempt in {}): {}", failure.bucket, failure.region, failure.message);
        }
    }
}


/// Delete every object of a single listing, one by one. Stops at the first failing delete.
/// Returns the number of deleted objects.
pub async fn empty_bucket<S: BucketStore + ?Sized>(store: &S, bucket_name: &str) -> Result<usize, SweepError> {
    let listing = store.list_objects(bucket_name).await?;
    if listing.truncated {
        // only the first page is deleted; the bucket delete will then fail on a non-empty bucket
        warn!("Object listing of bucket {bucket_name} is truncated after {} keys", listing.keys.len());
    }

    for key in &listing.keys {
        store.delete_object(bucket_name, key).await?;
    }

    Ok(listing.keys.len())
}


/// Empty and delete one bucket unless it is excluded.
pub async fn sweep_bucket<S: BucketStore + ?Sized>(
    store: &S,
    bucket_name: &str,
    exclusions: &ExclusionSet,
) -> BucketOutcome {
    if exclusions.is_excluded(bucket_name) {
        return BucketOutcome::Excluded;
    }

    let objects = match empty_bucket(store, bucket_name).await {
        Ok(objects) => objects,
        Err(err) => return BucketOutcome::EmptyFailed(err),
    };

    match store.delete_bucket(bucket_name).await {
        Ok(()) => BucketOutcome::Deleted { objects },
        Err(error) => BucketOutcome::DeleteFailed { objects, error },
    }
}


/// Sweep all buckets visible from `region`. Only a failing bucket listing is returned as error,
/// failures of individual buckets are logged and recorded in the report.
pub async fn sweep_region<S: BucketStore + ?Sized>(
    store: &S,
    region: &str,
    exclusions: &ExclusionSet,
    report: &mut SweepReport,
) -> Result<(), SweepError> {
    let bucket_names = store.list_buckets().await?;
    debug!("Found {} buckets from region {region}", bucket_names.len());

    for bucket_name in &bucket_names {
        if report.is_settled(bucket_name) {
            debug!("Bucket {bucket_name} was already handled in an earlier region");
            continue;
        }

        let outcome = sweep_bucket(store, bucket_name, exclusions).await;
        if let BucketOutcome::Deleted { objects } | BucketOutcome::DeleteFailed { objects, .. } = &outcome {
            debug!("Deleted {objects} objects from bucket {bucket_name}");
        }
        for (level, line) in outcome.progress_lines(bucket_name, region) {
            if level == Level::ERROR {
                error!("{line}");
            } else {
                info!("{line}");
            }
        }
        report.record(region, bucket_name, outcome);
    }

    Ok(())
}


/// Run the complete sweep: enumerate the regions once, then handle them one after the other,
/// each through its own store.
pub async fn sweep_all<R, P>(
    regions: &R,
    provider: &P,
    exclusions: &ExclusionSet,
) -> Result<SweepReport, SweepError>
where
    R: RegionSource + ?Sized,
    P: StoreProvider + ?Sized,
{
    let region_names = regions.region_names().await?;
    let mut report = SweepReport::default();

    for region in &region_names {
        info!("Handling S3 buckets in region: {region}");
        let store = provider.store_for_region(region);
        report.regions_visited += 1;

        if let Err(err) = sweep_region(&store, region, exclusions, &mut report).await {
            error!("Error handling buckets in region {region}: {}", DisplayErrorContext(&err));
            report.failed_regions.push((region.clone(), DisplayErrorContext(&err).to_string()));
        }
    }

    Ok(report)
}

//! In-memory account used by the unit tests in place of S3 and EC2.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::SweepError;
use crate::regions::RegionSource;
use crate::s3_aux::{BucketStore, ObjectListing, StoreProvider};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBuckets { region: String },
    ListObjects { region: String, bucket: String },
    DeleteObject { region: String, bucket: String, key: String },
    DeleteBucket { region: String, bucket: String },
}

#[derive(Debug, Default)]
struct FakeBucket {
    keys: Vec<String>,
    // when set, bucket operations from any other region are rejected
    home_region: Option<String>,
}

#[derive(Debug, Default)]
struct AccountState {
    buckets: BTreeMap<String, FakeBucket>,
    calls: Vec<Call>,
    failing_list_buckets: HashSet<String>,
    failing_list_objects: HashSet<String>,
    failing_deletes: HashSet<(String, String)>,
    failing_bucket_deletes: HashSet<String>,
    page_size: Option<usize>,
}


#[derive(Debug, Default, Clone)]
pub struct FakeAccount {
    state: Arc<Mutex<AccountState>>,
}

impl FakeAccount {

    pub fn with_bucket(self, name: &str, keys: &[&str]) -> Self {
        self.state.lock().unwrap().buckets.insert(
            name.to_owned(),
            FakeBucket { keys: keys.iter().map(|k| k.to_string()).collect(), home_region: None });
        self
    }

    pub fn with_regional_bucket(self, name: &str, home_region: &str, keys: &[&str]) -> Self {
        self.state.lock().unwrap().buckets.insert(
            name.to_owned(),
            FakeBucket {
                keys: keys.iter().map(|k| k.to_string()).collect(),
                home_region: Some(home_region.to_owned()) });
        self
    }

    pub fn fail_list_buckets_in(self, region: &str) -> Self {
        self.state.lock().unwrap().failing_list_buckets.insert(region.to_owned());
        self
    }

    pub fn fail_list_objects_of(self, bucket: &str) -> Self {
        self.state.lock().unwrap().failing_list_objects.insert(bucket.to_owned());
        self
    }

    pub fn fail_delete_of(self, bucket: &str, key: &str) -> Self {
        self.state.lock().unwrap().failing_deletes.insert((bucket.to_owned(), key.to_owned()));
        self
    }

    pub fn fail_bucket_delete_of(self, bucket: &str) -> Self {
        self.state.lock().unwrap().failing_bucket_deletes.insert(bucket.to_owned());
        self
    }

    /// listings return at most `page_size` keys and flag the rest as truncated
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state.lock().unwrap().page_size = Some(page_size);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.state.lock().unwrap().buckets.keys().cloned().collect()
    }

    pub fn object_keys(&self, bucket: &str) -> Option<Vec<String>> {
        self.state.lock().unwrap().buckets.get(bucket).map(|b| b.keys.clone())
    }
}


pub struct FakeStore {
    account: FakeAccount,
    region: String,
}

impl FakeStore {
    fn record(&self, call: Call) {
        self.account.state.lock().unwrap().calls.push(call);
    }
}

fn redirect_error(bucket: &FakeBucket, region: &str) -> Option<String> {
    match &bucket.home_region {
        Some(home) if home != region => Some(format!("PermanentRedirect: bucket lives in {home}")),
        _ => None,
    }
}

#[async_trait]
impl BucketStore for FakeStore {

    async fn list_buckets(&self) -> Result<Vec<String>, SweepError> {
        self.record(Call::ListBuckets { region: self.region.clone() });
        let state = self.account.state.lock().unwrap();
        if state.failing_list_buckets.contains(&self.region) {
            return Err(SweepError::ListBuckets {
                region: self.region.clone(),
                source: "ServiceUnavailable".into(),
            });
        }
        Ok(state.buckets.keys().cloned().collect())
    }

    async fn list_objects(&self, bucket_name: &str) -> Result<ObjectListing, SweepError> {
        self.record(Call::ListObjects { region: self.region.clone(), bucket: bucket_name.to_owned() });
        let state = self.account.state.lock().unwrap();
        let failure = |msg: String| SweepError::ListObjects { bucket: bucket_name.to_owned(), source: msg.into() };

        if state.failing_list_objects.contains(bucket_name) {
            return Err(failure("AccessDenied".to_owned()));
        }
        let bucket = state.buckets.get(bucket_name).ok_or_else(|| failure("NoSuchBucket".to_owned()))?;
        if let Some(msg) = redirect_error(bucket, &self.region) {
            return Err(failure(msg));
        }

        let page_size = state.page_size.unwrap_or(usize::MAX);
        let keys: Vec<String> = bucket.keys.iter().take(page_size).cloned().collect();
        let truncated = keys.len() < bucket.keys.len();
        Ok(ObjectListing { keys, truncated })
    }

    async fn delete_object(&self, bucket_name: &str, key: &str) -> Result<(), SweepError> {
        self.record(Call::DeleteObject {
            region: self.region.clone(),
            bucket: bucket_name.to_owned(),
            key: key.to_owned() });
        let mut state = self.account.state.lock().unwrap();
        if state.failing_deletes.contains(&(bucket_name.to_owned(), key.to_owned())) {
            return Err(SweepError::DeleteObject {
                bucket: bucket_name.to_owned(),
                key: key.to_owned(),
                source: "AccessDenied".into(),
            });
        }
        if let Some(bucket) = state.buckets.get_mut(bucket_name) {
            bucket.keys.retain(|k| k != key);
        }
        Ok(())
    }

    async fn delete_bucket(&self, bucket_name: &str) -> Result<(), SweepError> {
        self.record(Call::DeleteBucket { region: self.region.clone(), bucket: bucket_name.to_owned() });
        let mut state = self.account.state.lock().unwrap();
        let failure = |msg: String| SweepError::DeleteBucket { bucket: bucket_name.to_owned(), source: msg.into() };

        if state.failing_bucket_deletes.contains(bucket_name) {
            return Err(failure("AccessDenied".to_owned()));
        }
        let bucket = state.buckets.get(bucket_name).ok_or_else(|| failure("NoSuchBucket".to_owned()))?;
        if let Some(msg) = redirect_error(bucket, &self.region) {
            return Err(failure(msg));
        }
        if !bucket.keys.is_empty() {
            return Err(failure("BucketNotEmpty".to_owned()));
        }
        state.buckets.remove(bucket_name);
        Ok(())
    }
}

impl StoreProvider for FakeAccount {
    type Store = FakeStore;

    fn store_for_region(&self, region: &str) -> FakeStore {
        FakeStore { account: self.clone(), region: region.to_owned() }
    }
}


/// Region source whose enumeration call always fails.
pub struct FailingRegions;

#[async_trait]
impl RegionSource for FailingRegions {
    async fn region_names(&self) -> Result<Vec<String>, SweepError> {
        Err(SweepError::DescribeRegions("AuthFailure".into()))
    }
}

pub fn regions(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

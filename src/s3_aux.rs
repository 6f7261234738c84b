
use async_trait::async_trait;
use aws_sdk_s3::Client;

use crate::client::AwsSession;
use crate::error::SweepError;


/// Keys of a single (unpaginated) object listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    pub keys: Vec<String>,
    /// the provider has more keys than returned in this page
    pub truncated: bool,
}


/// The storage operations a sweep needs. One store talks to exactly one region.
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// all buckets of the account (the listing is not region-scoped)
    async fn list_buckets(&self) -> Result<Vec<String>, SweepError>;

    async fn list_objects(&self, bucket_name: &str) -> Result<ObjectListing, SweepError>;

    async fn delete_object(&self, bucket_name: &str, key: &str) -> Result<(), SweepError>;

    async fn delete_bucket(&self, bucket_name: &str) -> Result<(), SweepError>;
}


/// Builds the store for a region; called once per region of the sweep.
pub trait StoreProvider {
    type Store: BucketStore;

    fn store_for_region(&self, region: &str) -> Self::Store;
}


pub struct S3BucketStore {
    client: Client,
    region: String,
}

impl S3BucketStore {
    pub fn new(client: Client, region: impl Into<String>) -> Self {
        Self { client, region: region.into() }
    }
}

#[async_trait]
impl BucketStore for S3BucketStore {

    async fn list_buckets(&self) -> Result<Vec<String>, SweepError> {
        let buckets = self.client
            .list_buckets()
            .send()
            .await
            .map_err(|err| SweepError::ListBuckets {
                region: self.region.clone(),
                source: aws_sdk_s3::Error::from(err).into(),
            })?;

        Ok(buckets
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name())
            .map(str::to_owned)
            .collect())
    }

    async fn list_objects(&self, bucket_name: &str) -> Result<ObjectListing, SweepError> {
        let objects = self.client
            .list_objects_v2()
            .bucket(bucket_name)
            .send()
            .await
            .map_err(|err| SweepError::ListObjects {
                bucket: bucket_name.to_owned(),
                source: aws_sdk_s3::Error::from(err).into(),
            })?;

        let keys = objects
            .contents()
            .iter()
            .filter_map(|obj| obj.key())
            .map(str::to_owned)
            .collect();

        Ok(ObjectListing { keys, truncated: objects.is_truncated() == Some(true) })
    }

    async fn delete_object(&self, bucket_name: &str, key: &str) -> Result<(), SweepError> {
        self.client
            .delete_object()
            .bucket(bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|err| SweepError::DeleteObject {
                bucket: bucket_name.to_owned(),
                key: key.to_owned(),
                source: aws_sdk_s3::Error::from(err).into(),
            })?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket_name: &str) -> Result<(), SweepError> {
        self.client
            .delete_bucket()
            .bucket(bucket_name)
            .send()
            .await
            .map_err(|err| SweepError::DeleteBucket {
                bucket: bucket_name.to_owned(),
                source: aws_sdk_s3::Error::from(err).into(),
            })?;
        Ok(())
    }
}


impl StoreProvider for AwsSession {
    type Store = S3BucketStore;

    fn store_for_region(&self, region: &str) -> S3BucketStore {
        S3BucketStore::new(self.s3_client_for(region), region)
    }
}

use async_trait::async_trait;
use tracing::debug;

use crate::client::AwsSession;
use crate::error::SweepError;


/// Source of the region names a sweep walks through.
#[async_trait]
pub trait RegionSource {
    /// Ordered region names known to the provider. An error here aborts the whole run.
    async fn region_names(&self) -> Result<Vec<String>, SweepError>;
}


/// Regions enabled for the account, as reported by EC2 DescribeRegions.
pub struct Ec2Regions {
    client: aws_sdk_ec2::Client,
}

impl Ec2Regions {
    pub fn new(session: &AwsSession) -> Self {
        Self { client: session.ec2_client() }
    }
}

#[async_trait]
impl RegionSource for Ec2Regions {
    async fn region_names(&self) -> Result<Vec<String>, SweepError> {
        let output = self.client
            .describe_regions()
            .send()
            .await
            .map_err(|err| SweepError::DescribeRegions(aws_sdk_ec2::Error::from(err).into()))?;

        let names: Vec<String> = output
            .regions()
            .iter()
            .filter_map(|region| region.region_name())
            .map(str::to_owned)
            .collect();
        debug!("DescribeRegions returned {} regions", names.len());

        Ok(names)
    }
}


/// A fixed list of regions, for sweeping a known subset without calling EC2.
#[async_trait]
impl RegionSource for Vec<String> {
    async fn region_names(&self) -> Result<Vec<String>, SweepError> {
        Ok(self.clone())
    }
}

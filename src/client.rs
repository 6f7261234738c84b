
use aws_config::{
    meta::region::RegionProviderChain,
    BehaviorVersion,
    Region,
    SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use tracing::debug;

use crate::config::SweepConfig;
use crate::error::{BoxError, SweepError};


/// The authenticated session for one run. Clients for a specific region are built from it on demand,
/// so no client is ever re-pointed to another region.
#[derive(Debug, Clone)]
pub struct AwsSession {
    sdk_config: SdkConfig,
}

impl AwsSession {

    /// Load the shared config for the profile in the configured home region.
    /// Credentials are resolved right away, so a missing or broken profile fails here.
    pub async fn load(config: &SweepConfig) -> Result<Self, SweepError> {
        let region_provider = RegionProviderChain::first_try(Region::new(config.home_region.clone()));

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&config.profile)
            .region(region_provider)
            .load()
            .await;

        let no_credentials = |source: BoxError| SweepError::NoCredentials { profile: config.profile.clone(), source };
        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| no_credentials("no credentials provider configured".into()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|err| no_credentials(err.into()))?;
        debug!("Loaded session for profile {} in region {:?}", config.profile, sdk_config.region());

        Ok(Self::from_sdk_config(sdk_config))
    }

    pub fn from_sdk_config(sdk_config: SdkConfig) -> Self {
        Self { sdk_config }
    }

    /// a fresh S3 client that sends all requests to `region`
    pub fn s3_client_for(&self, region: &str) -> aws_sdk_s3::Client {
        let s3_config = aws_sdk_s3::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_owned()))
            .build();
        aws_sdk_s3::Client::from_conf(s3_config)
    }

    /// EC2 client in the home region, only used to enumerate the regions.
    pub fn ec2_client(&self) -> aws_sdk_ec2::Client {
        aws_sdk_ec2::Client::new(&self.sdk_config)
    }
}

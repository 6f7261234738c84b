use aws_sdk_s3::error::DisplayErrorContext;
use bucket_sweeper::{sweep_all, AwsSession, Ec2Regions, SweepConfig, SweepError};
use tracing::{error, info};


/// Delete all buckets of the account, except the ones matching the default exclusions.
/// Only a failing session or region enumeration ends the process with an error.
#[tokio::main]
async fn main() -> Result<(), SweepError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .without_time()
        .init();

    let config = SweepConfig::default();
    info!("Keeping buckets whose name contains any of {:?}", config.exclusions.patterns());

    let session = AwsSession::load(&config).await.map_err(|err| {
        error!("Error creating session: {}", DisplayErrorContext(&err));
        err
    })?;

    let regions = Ec2Regions::new(&session);
    let report = sweep_all(&regions, &session, &config.exclusions)
        .await
        .map_err(|err| {
            error!("Error describing regions: {}", DisplayErrorContext(&err));
            err
        })?;

    report.log_summary();

    Ok(())
}

use crate::exclusion::ExclusionSet;


pub const DEFAULT_PROFILE: &str = "default";
/// Region of the session itself; the EC2 region enumeration is sent here.
pub const HOME_REGION: &str = "us-east-1";


/// Static configuration of a sweep. The binary runs with the defaults.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// profile in the shared AWS config/credentials files
    pub profile: String,
    pub home_region: String,
    pub exclusions: ExclusionSet,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_owned(),
            home_region: HOME_REGION.to_owned(),
            exclusions: ExclusionSet::default(),
        }
    }
}

impl SweepConfig {

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_home_region(mut self, region: impl Into<String>) -> Self {
        self.home_region = region.into();
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }
}

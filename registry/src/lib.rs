use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::campaign::CampaignRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::hoarding::HoardingRepositoryImpl;
use kernel::repository::campaign::CampaignRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::hoarding::HoardingRepository;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    hoarding_repository: Arc<dyn HoardingRepository>,
    campaign_repository: Arc<dyn CampaignRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let hoarding_repository = Arc::new(HoardingRepositoryImpl::new(pool.clone()));
        let campaign_repository = Arc::new(CampaignRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            hoarding_repository,
            campaign_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn hoarding_repository(&self) -> Arc<dyn HoardingRepository> {
        self.hoarding_repository.clone()
    }

    pub fn campaign_repository(&self) -> Arc<dyn CampaignRepository> {
        self.campaign_repository.clone()
    }
}

use std::time::Instant;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::ports::LLMClient,
    health::{entities::StoreHealthStatus, ports::HealthCheckService},
    realtime::{ports::RealtimeStore, value_objects::StorePath},
    relay::ports::MessagingRelay,
};

impl<LLM, RS, MR> HealthCheckService for Service<LLM, RS, MR>
where
    LLM: LLMClient,
    RS: RealtimeStore,
    MR: MessagingRelay,
{
    async fn readiness(&self) -> Result<StoreHealthStatus, CoreError> {
        let started = Instant::now();
        self.realtime_store.get(&StorePath::scale_weight()).await?;

        Ok(StoreHealthStatus {
            reachable: true,
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}

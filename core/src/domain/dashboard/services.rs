use crate::domain::{
    common::{entities::app_errors::CoreError, now_millis, services::Service},
    dashboard::{
        live::LiveDashboard,
        ports::DashboardService,
        state::{FoodDataState, ScaleWeightState},
        view::DashboardView,
    },
    food_analysis::ports::LLMClient,
    realtime::{ports::RealtimeStore, value_objects::StorePath},
    relay::ports::MessagingRelay,
};

impl<LLM, RS, MR> DashboardService for Service<LLM, RS, MR>
where
    LLM: LLMClient,
    RS: RealtimeStore,
    MR: MessagingRelay,
{
    async fn dashboard_snapshot(&self) -> Result<DashboardView, CoreError> {
        let food_path = StorePath::food();
        let weight_path = StorePath::scale_weight();

        let (food, weight) = tokio::join!(
            self.realtime_store.get(&food_path),
            self.realtime_store.get(&weight_path)
        );

        let mut food_state = FoodDataState::default();
        match food {
            Ok(value) => food_state.on_value(value, now_millis()),
            Err(e) => {
                tracing::warn!(error = %e, path = %food_path, "Failed to read food record");
                food_state.on_error(e.to_string());
            }
        }

        let mut weight_state = ScaleWeightState::default();
        match weight {
            Ok(value) => weight_state.on_value(value),
            Err(e) => {
                tracing::warn!(error = %e, path = %weight_path, "Failed to read scale weight");
                weight_state.on_error(e.to_string());
            }
        }

        Ok(DashboardView::render(&food_state, &weight_state))
    }

    fn watch_dashboard(&self) -> Result<LiveDashboard, CoreError> {
        let food = self.realtime_store.subscribe(&StorePath::food())?;
        let weight = self.realtime_store.subscribe(&StorePath::scale_weight())?;

        Ok(LiveDashboard::new(food, weight))
    }
}

use std::{future, time::Duration};

use crate::domain::{
    common::now_millis,
    dashboard::{
        state::{FoodDataState, ScaleWeightState},
        view::DashboardView,
    },
    realtime::{entities::SubscriptionEvent, subscription::Subscription},
};

/// Dashboard bound to the food and weight subscriptions.
///
/// Holds one state record per subscription and re-renders the view whenever
/// either changes, or when the displayed record crosses the freshness window.
/// Dropping it unsubscribes from both paths.
#[derive(Debug)]
pub struct LiveDashboard {
    food: Option<Subscription>,
    weight: Option<Subscription>,
    food_state: FoodDataState,
    weight_state: ScaleWeightState,
}

enum Update {
    Food(Option<SubscriptionEvent>),
    Weight(Option<SubscriptionEvent>),
    FreshnessElapsed,
}

impl LiveDashboard {
    pub fn new(food: Subscription, weight: Subscription) -> Self {
        Self {
            food: Some(food),
            weight: Some(weight),
            food_state: FoodDataState::default(),
            weight_state: ScaleWeightState::default(),
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::render(&self.food_state, &self.weight_state)
    }

    pub fn food_state(&self) -> &FoodDataState {
        &self.food_state
    }

    pub fn weight_state(&self) -> &ScaleWeightState {
        &self.weight_state
    }

    /// Waits for the next change and returns the re-rendered view.
    ///
    /// Returns `None` once both subscriptions have ended.
    pub async fn next_update(&mut self) -> Option<DashboardView> {
        loop {
            if self.food.is_none() && self.weight.is_none() {
                return None;
            }

            let stale_in = self
                .food_state
                .fresh_until()
                .map(|deadline| Duration::from_millis((deadline - now_millis()).max(0) as u64));

            let update = tokio::select! {
                event = next_event(&mut self.food) => Update::Food(event),
                event = next_event(&mut self.weight) => Update::Weight(event),
                _ = sleep_for(stale_in) => Update::FreshnessElapsed,
            };

            match update {
                Update::Food(Some(event)) => match event {
                    SubscriptionEvent::Value(value) => self.food_state.on_value(value, now_millis()),
                    SubscriptionEvent::Error(message) => self.food_state.on_error(message),
                },
                Update::Weight(Some(event)) => match event {
                    SubscriptionEvent::Value(value) => self.weight_state.on_value(value),
                    SubscriptionEvent::Error(message) => self.weight_state.on_error(message),
                },
                Update::Food(None) => {
                    self.food = None;
                    continue;
                }
                Update::Weight(None) => {
                    self.weight = None;
                    continue;
                }
                Update::FreshnessElapsed => {
                    let was_valid = self.food_state.is_data_valid;
                    self.food_state.refresh(now_millis());
                    if was_valid == self.food_state.is_data_valid {
                        continue;
                    }
                    tracing::debug!("Displayed nutrition record went stale");
                }
            }

            return Some(self.view());
        }
    }
}

async fn next_event(subscription: &mut Option<Subscription>) -> Option<SubscriptionEvent> {
    match subscription {
        Some(subscription) => subscription.next().await,
        None => future::pending().await,
    }
}

async fn sleep_for(duration: Option<Duration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        dashboard::view::{NutritionPanel, ScalePanel},
        food_analysis::value_objects::FRESHNESS_WINDOW_MS,
        realtime::value_objects::StorePath,
    };

    fn record_json(timestamp: i64) -> serde_json::Value {
        json!({
            "food": "Red Apple",
            "nutritional_facts_per_gram": {
                "calories": 0.475,
                "carbohydrates": { "total": 0.125, "sugars": 0.095, "dietary_fiber": 0.02 },
                "protein": 0.0025,
                "fat": 0.0015,
                "vitamin_c": "0.07% RDI",
                "potassium_mg": 0.975,
                "water_content": "85%"
            },
            "timestamp": timestamp
        })
    }

    #[tokio::test]
    async fn test_pushes_update_the_view() {
        let (food_tx, food) = Subscription::channel(StorePath::food());
        let (weight_tx, weight) = Subscription::channel(StorePath::scale_weight());
        let mut live = LiveDashboard::new(food, weight);

        assert_eq!(live.view().nutrition, NutritionPanel::Loading);

        weight_tx
            .send(SubscriptionEvent::Value(Some(json!(200.0))))
            .await
            .unwrap();
        let view = live.next_update().await.unwrap();
        assert!(matches!(view.scale, ScalePanel::Gauge(ref g) if g.weight.value == 200.0));
        assert_eq!(view.nutrition, NutritionPanel::Loading);

        food_tx
            .send(SubscriptionEvent::Value(Some(record_json(now_millis()))))
            .await
            .unwrap();
        let view = live.next_update().await.unwrap();
        match view.nutrition {
            NutritionPanel::Facts(facts) => {
                assert_eq!(facts.food, "Red Apple");
                assert_eq!(facts.calories.display, "95.0 kcal");
            }
            other => panic!("expected facts, got {:?}", other),
        }
        assert!(!view.is_stale);
    }

    #[tokio::test]
    async fn test_errors_surface_per_subscription() {
        let (food_tx, food) = Subscription::channel(StorePath::food());
        let (weight_tx, weight) = Subscription::channel(StorePath::scale_weight());
        let mut live = LiveDashboard::new(food, weight);

        weight_tx
            .send(SubscriptionEvent::Error("Permission denied".to_string()))
            .await
            .unwrap();
        let view = live.next_update().await.unwrap();
        assert!(matches!(view.scale, ScalePanel::Error { .. }));
        assert_eq!(
            live.weight_state().error.as_deref(),
            Some("Permission denied")
        );

        food_tx
            .send(SubscriptionEvent::Error("Permission denied".to_string()))
            .await
            .unwrap();
        live.next_update().await.unwrap();
        assert_eq!(live.food_state().error.as_deref(), Some("Permission denied"));
        assert!(!live.food_state().loading);
    }

    #[tokio::test]
    async fn test_record_goes_stale_without_push() {
        let (food_tx, food) = Subscription::channel(StorePath::food());
        let (_weight_tx, weight) = Subscription::channel(StorePath::scale_weight());
        let mut live = LiveDashboard::new(food, weight);

        // Goes stale 50ms from now.
        let timestamp = now_millis() - FRESHNESS_WINDOW_MS + 50;
        food_tx
            .send(SubscriptionEvent::Value(Some(record_json(timestamp))))
            .await
            .unwrap();
        let view = live.next_update().await.unwrap();
        assert!(matches!(view.nutrition, NutritionPanel::Facts(_)));

        let view = tokio::time::timeout(Duration::from_secs(2), live.next_update())
            .await
            .expect("stale update")
            .unwrap();
        assert!(view.is_stale);
        assert!(matches!(view.nutrition, NutritionPanel::Empty { .. }));
    }

    #[tokio::test]
    async fn test_ends_when_both_subscriptions_end() {
        let (food_tx, food) = Subscription::channel(StorePath::food());
        let (weight_tx, weight) = Subscription::channel(StorePath::scale_weight());
        let mut live = LiveDashboard::new(food, weight);

        drop(food_tx);
        weight_tx
            .send(SubscriptionEvent::Value(Some(json!(5))))
            .await
            .unwrap();
        drop(weight_tx);

        assert!(live.next_update().await.is_some());
        assert!(live.next_update().await.is_none());
    }
}

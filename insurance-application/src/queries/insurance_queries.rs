use crate::commands::load_profile;
use crate::dtos::PendingPackage;
use crate::{AppError, AppState};

pub async fn list_pending_packages(
    state: &AppState,
    session_id: &str,
    now: i64,
) -> Result<Vec<PendingPackage>, AppError> {
    let profile = load_profile(state, session_id).await?;
    let mut pending = profile
        .insurance
        .iter()
        .map(|package| PendingPackage {
            trader_id: package.trader_id.clone(),
            trader_name: state.trader_name(&package.trader_id),
            location_name: package.location_name.clone(),
            scheduled_time: package.scheduled_time,
            item_count: package.items.len(),
            due: package.is_due(now),
        })
        .collect::<Vec<_>>();
    pending.sort_by_key(|package| package.scheduled_time);
    Ok(pending)
}

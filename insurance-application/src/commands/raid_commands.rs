use tracing::{debug, info, warn};

use insurance_domain::{
    EndRaidRequest, InsurancePackage, LossContext, LossEntry, LossSetBuilder, MailKind,
};

use crate::commands::{load_profile, send_mail};
use crate::{AppError, AppState};

/// Hands the insured items a player lost in a raid over to their traders.
///
/// Returns the number of insurance packages stored on the profile.
pub async fn handle_insured_items_lost(
    state: &AppState,
    session_id: &str,
    request: EndRaidRequest,
    now: i64,
) -> Result<usize, AppError> {
    if request.lost_insured_items.is_empty() {
        return Ok(0);
    }
    if session_id.trim().is_empty() {
        return Err(AppError::BadRequest("session id is required".to_string()));
    }

    let mut profile = load_profile(state, session_id).await?;
    let dead = request.exit_status.is_dead();
    let builder = LossSetBuilder::new(
        state.death_policy.as_ref(),
        state.config.insurance.simulate_items_being_taken,
    );
    let context = LossContext {
        session_id,
        profile_id: &profile.id,
        inventory: &profile.inventory_items,
        survived: !dead,
        post_raid_equipment: (dead && !request.post_raid_equipment.is_empty())
            .then_some(request.post_raid_equipment.as_slice()),
    };
    let entries = builder.build_loss_entries(
        &context,
        &request.lost_insured_items,
        &profile.insured_items,
    );

    // Lost items can all be filtered out before they reach a trader.
    if entries.is_empty() {
        debug!("no insurable items lost by session {}", session_id);
        return Ok(0);
    }

    let scheduled_time =
        now.saturating_add(i64::try_from(state.config.insurance.return_delay_seconds).unwrap_or(i64::MAX));
    let packages = store_gear_lost_in_raid(&entries, &request.location_name, scheduled_time);
    let stored = packages.len();
    let traders = packages
        .iter()
        .map(|package| package.trader_id.clone())
        .collect::<Vec<_>>();

    profile.insurance.extend(packages);
    state.profiles.save_profile(&profile).await?;
    state.metrics.record_packages_stored(stored);
    info!(
        "stored {} insurance packages ({} items) for session {}",
        stored,
        entries.len(),
        session_id
    );

    // Packages are saved; a failed notice is logged, not propagated.
    for trader_id in traders {
        if let Err(err) = send_mail(
            state,
            session_id,
            &trader_id,
            MailKind::InsuranceStart,
            &request.location_name,
            Vec::new(),
            now,
        )
        .await
        {
            warn!(
                "insurance start mail from trader {} to session {} failed: {}",
                trader_id, session_id, err
            );
        }
    }

    Ok(stored)
}

/// Groups loss entries into one package per trader, in first-seen order.
pub fn store_gear_lost_in_raid(
    entries: &[LossEntry],
    location_name: &str,
    scheduled_time: i64,
) -> Vec<InsurancePackage> {
    let mut packages: Vec<InsurancePackage> = Vec::new();
    for entry in entries {
        let mut item = entry.item.clone();
        item.dropped = entry.dropped.then_some(true);

        match packages
            .iter_mut()
            .find(|package| package.trader_id == entry.trader_id)
        {
            Some(package) => package.items.push(item),
            None => packages.push(InsurancePackage {
                trader_id: entry.trader_id.clone(),
                scheduled_time,
                location_name: location_name.to_string(),
                items: vec![item],
            }),
        }
    }
    packages
}

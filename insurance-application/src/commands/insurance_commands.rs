use tracing::{debug, info};

use insurance_domain::{
    adopt_orphaned_items, clear_dropped_markers, InsurancePackage, InsuranceResolver, MailKind,
    PmcProfile, ReturnSummary,
};

use crate::commands::{load_profile, send_mail};
use crate::{AppError, AppState};

/// Processes every insurance package of the session that is due at `now`:
/// rolls for stolen items, mails the survivors and drops the package.
pub async fn process_returns(
    state: &AppState,
    session_id: &str,
    now: i64,
) -> Result<ReturnSummary, AppError> {
    let mut profile = load_profile(state, session_id).await?;
    let due = profile
        .insurance
        .iter()
        .filter(|package| package.is_due(now))
        .cloned()
        .collect::<Vec<_>>();
    if due.is_empty() {
        return Ok(ReturnSummary::default());
    }

    debug!(
        "Processing {} insurance packages, which includes a total of {} items, in profile {}",
        due.len(),
        count_all_insurance_items(&due),
        session_id
    );

    let mut summary = ReturnSummary::default();
    for original in due {
        let mut package = original.clone();
        let deleted = resolve_insured_package(state, &mut package).await;

        let kind = if package.items.is_empty() {
            MailKind::InsuranceFailed
        } else {
            MailKind::InsuranceReturned
        };
        let returned = package.items.len();
        send_mail(
            state,
            session_id,
            &package.trader_id,
            kind,
            &package.location_name,
            package.items,
            now,
        )
        .await?;

        // Mail goes out before the save: a failed save redelivers next run.
        remove_insurance_package(&mut profile, &original);
        state.profiles.save_profile(&profile).await?;

        state.metrics.record_package_processed(returned, deleted);
        summary.packages += 1;
        summary.returned += returned;
        summary.deleted += deleted;
    }

    info!(
        "processed {} insurance packages for session {}: {} returned, {} lost",
        summary.packages, session_id, summary.returned, summary.deleted
    );
    Ok(summary)
}

async fn resolve_insured_package(state: &AppState, package: &mut InsurancePackage) -> usize {
    if !state.config.insurance.simulate_items_being_taken {
        let root_id = state.ids.generate();
        adopt_orphaned_items(&root_id, &mut package.items);
        clear_dropped_markers(&mut package.items);
        return 0;
    }

    let resolver = InsuranceResolver::new(
        state.catalog.as_ref(),
        state.traders.as_ref(),
        state.ids.as_ref(),
        state.locale.as_ref(),
    );
    let mut rng = state.rng.lock().await;
    let resolution = resolver.resolve_package(
        package,
        &state.config.insurance.return_chance_percent,
        &mut **rng,
    );
    resolution.deleted.len()
}

fn count_all_insurance_items(packages: &[InsurancePackage]) -> usize {
    packages.iter().map(|package| package.items.len()).sum()
}

fn remove_insurance_package(profile: &mut PmcProfile, package: &InsurancePackage) {
    if let Some(index) = profile
        .insurance
        .iter()
        .position(|candidate| candidate == package)
    {
        profile.insurance.remove(index);
    }
}

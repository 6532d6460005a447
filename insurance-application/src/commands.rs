pub mod insurance_commands;
pub mod raid_commands;

use insurance_domain::{InsuranceMail, Item, MailKind, PmcProfile};

use crate::{AppError, AppState};

pub(crate) async fn load_profile(state: &AppState, session_id: &str) -> Result<PmcProfile, AppError> {
    state
        .profiles
        .load_profile(session_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound(session_id.to_string()))
}

pub(crate) async fn send_mail(
    state: &AppState,
    session_id: &str,
    trader_id: &str,
    kind: MailKind,
    location_name: &str,
    items: Vec<Item>,
    now: i64,
) -> Result<(), AppError> {
    let trader_name = state.trader_name(trader_id);
    let text = state.locale.get_text(
        kind.locale_key(),
        &[
            ("traderName", trader_name.as_str()),
            ("locationName", location_name),
        ],
    );
    let mail = InsuranceMail {
        trader_id: trader_id.to_string(),
        kind,
        text,
        items,
        sent_at: now,
    };
    state.mailer.send_mail(session_id, mail).await.map_err(|err| {
        state.metrics.record_mail_error();
        AppError::Internal(err)
    })
}

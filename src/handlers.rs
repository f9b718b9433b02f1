use crate::errors::AppError;
use crate::flash::{self, Flash};
use crate::models::{AddSleepForm, AppData, GoalForm};
use crate::sleep::{parse_hours, EntryOutcome};
use crate::state::AppState;
use crate::ui::{render_goal, render_index};
use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::{Html, Response},
    Form, Json,
};
use chrono::Local;
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let pending = flash::take(&headers);
    let data = state.store.load().await?;
    let page = render_index(&data, &today_string(), pending);
    Ok(flash::consume(pending, Html(page)))
}

pub async fn goal(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let pending = flash::take(&headers);
    let data = state.store.load().await?;
    Ok(flash::consume(pending, Html(render_goal(&data, pending))))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<AppData>, AppError> {
    Ok(Json(state.store.load().await?))
}

pub async fn add_sleep(
    State(state): State<AppState>,
    form: Result<Form<AddSleepForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = form_or_default(form);
    let hours = match parse_hours(form.hours_slept.as_deref()) {
        Ok(hours) => hours,
        Err(err) => {
            warn!("rejected sleep entry: {err}");
            return Ok(flash::redirect_with("/", Flash::InvalidHours));
        }
    };
    let date = form
        .sleep_date
        .as_deref()
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(today_string);

    let outcome = state
        .store
        .update(|data| data.record_sleep(&date, hours))
        .await?;

    let notice = match outcome {
        EntryOutcome::Added => Flash::EntryAdded,
        EntryOutcome::Updated => Flash::EntryUpdated,
    };
    info!("sleep entry {outcome:?}: {date} = {hours}h");
    Ok(flash::redirect_with("/", notice))
}

pub async fn set_goal(
    State(state): State<AppState>,
    form: Result<Form<GoalForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = form_or_default(form);
    let goal = match parse_hours(form.goal_hours.as_deref()) {
        Ok(goal) => goal,
        Err(err) => {
            warn!("rejected sleep goal: {err}");
            return Ok(flash::redirect_with("/goal", Flash::InvalidGoal));
        }
    };

    let achieved = state
        .store
        .update(|data| {
            data.set_goal(goal);
            data.achieved_count()
        })
        .await?;

    info!("sleep goal set to {goal}h, {achieved} nights now meet it");
    Ok(flash::redirect_with("/goal", Flash::GoalUpdated))
}

/// An unreadable form body counts as one with every field missing.
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!("unreadable form body: {rejection}");
            T::default()
        }
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}

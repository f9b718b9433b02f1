//! One-shot user notices carried across a redirect in a cookie.
//!
//! The write handlers attach a [`Flash`] to their redirect; the next page
//! rendered reads it, shows it once and clears the cookie.

use axum::{
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Redirect, Response},
};

pub const COOKIE_NAME: &str = "sleep_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Danger,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    EntryAdded,
    EntryUpdated,
    InvalidHours,
    GoalUpdated,
    InvalidGoal,
}

impl Flash {
    const ALL: [Flash; 5] = [
        Flash::EntryAdded,
        Flash::EntryUpdated,
        Flash::InvalidHours,
        Flash::GoalUpdated,
        Flash::InvalidGoal,
    ];

    pub fn category(self) -> Category {
        match self {
            Flash::EntryAdded | Flash::EntryUpdated | Flash::GoalUpdated => Category::Success,
            Flash::InvalidHours | Flash::InvalidGoal => Category::Danger,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::EntryAdded => "Sleep entry added!",
            Flash::EntryUpdated => "Sleep entry updated!",
            Flash::InvalidHours => "Please enter a valid number of hours.",
            Flash::GoalUpdated => "Sleep goal updated successfully!",
            Flash::InvalidGoal => "Please enter a valid goal in hours.",
        }
    }

    /// Cookie-safe token identifying the notice.
    pub fn key(self) -> &'static str {
        match self {
            Flash::EntryAdded => "entry-added",
            Flash::EntryUpdated => "entry-updated",
            Flash::InvalidHours => "invalid-hours",
            Flash::GoalUpdated => "goal-updated",
            Flash::InvalidGoal => "invalid-goal",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.key() == key)
    }

    fn set_cookie(self) -> String {
        format!("{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax", self.key())
    }
}

const CLEAR_COOKIE: &str = "sleep_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// Redirect to `uri` with `flash` pending for the next page.
pub fn redirect_with(uri: &str, flash: Flash) -> Response {
    ([(SET_COOKIE, flash.set_cookie())], Redirect::to(uri)).into_response()
}

/// Pulls a pending notice out of the request cookies, if any.
pub fn take(headers: &HeaderMap) -> Option<Flash> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| Flash::from_key(value.trim()))
}

/// Attaches the cookie-clearing header when a notice was consumed.
pub fn consume(flash: Option<Flash>, response: impl IntoResponse) -> Response {
    match flash {
        Some(_) => (
            [(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE))],
            response,
        )
            .into_response(),
        None => response.into_response(),
    }
}

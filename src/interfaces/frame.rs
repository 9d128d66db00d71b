//! Frame-protocol responses.
//!
//! A successful request renders an HTML document whose `og:description`
//! carries the pet's stats and whose buttons post back to the frame endpoint.
//! Failed requests become a small JSON error body with an HTTP status.

use crate::config::FrameSettings;
use crate::domain::pet::PetState;
use crate::domain::shop::ShopCatalog;
use crate::error::{PetError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// The frame protocol allows at most four buttons.
pub const MAX_BUTTONS: usize = 4;

/// Query values keep only RFC 3986 unreserved characters.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameButton {
    pub label: String,
    pub target: String,
}

/// A rendered response ready to be sent by an HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

pub struct FrameRenderer {
    settings: FrameSettings,
}

impl FrameRenderer {
    pub fn new(settings: FrameSettings) -> Self {
        Self { settings }
    }

    /// Feed, Play, then one purchase button per catalog item, capped at
    /// [`MAX_BUTTONS`].
    pub fn buttons(&self, pet: &PetState, catalog: &ShopCatalog) -> Vec<FrameButton> {
        let base = &self.settings.base_url;
        let fid = utf8_percent_encode(pet.fid.as_str(), QUERY_VALUE);

        let mut buttons = vec![
            FrameButton {
                label: "Feed".to_string(),
                target: format!("{base}?fid={fid}&action=feed"),
            },
            FrameButton {
                label: "Play".to_string(),
                target: format!("{base}?fid={fid}&action=play"),
            },
        ];
        buttons.extend(catalog.iter().map(|(id, item)| {
            let label = item
                .label
                .clone()
                .unwrap_or_else(|| format!("Buy {id}"));
            FrameButton {
                label: format!("{label} ({} coins)", item.cost),
                target: format!(
                    "{base}?fid={fid}&action=buy&item={}",
                    utf8_percent_encode(id.as_str(), QUERY_VALUE)
                ),
            }
        }));
        buttons.truncate(MAX_BUTTONS);
        buttons
    }

    pub fn description(pet: &PetState) -> String {
        format!(
            "Hunger: {} | Happiness: {} | Coins: {}",
            pet.hunger, pet.happiness, pet.coins
        )
    }

    pub fn render(&self, pet: &PetState, catalog: &ShopCatalog) -> FrameResponse {
        let title = escape(&self.settings.title);
        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");

        html.push_str(&meta("og:title", &title));
        html.push_str(&meta("og:image", &escape(&self.settings.image_url)));
        html.push_str(&meta("og:description", &Self::description(pet)));
        html.push_str(&meta("fc:frame", "vNext"));
        for (index, button) in self.buttons(pet, catalog).iter().enumerate() {
            let n = index + 1;
            html.push_str(&meta(
                &format!("fc:frame:button:{n}"),
                &escape(&button.label),
            ));
            html.push_str(&meta(
                &format!("fc:frame:button:{n}:action"),
                "post_redirect",
            ));
            html.push_str(&meta(
                &format!("fc:frame:button:{n}:target"),
                &escape(&button.target),
            ));
        }
        html.push_str(&format!(
            "</head>\n<body>\n<h1>{title}</h1>\n</body>\n</html>\n"
        ));

        FrameResponse {
            status: 200,
            content_type: "text/html",
            body: html,
        }
    }

    /// Maps a failed request to its JSON error response.
    pub fn error(err: &PetError) -> Result<FrameResponse> {
        let (status, message) = match err {
            PetError::MissingIdentifier => (400, "Missing user ID"),
            PetError::InvalidIdentifier(_) => (400, "Invalid user ID"),
            PetError::InsufficientFunds { .. } => (400, "Not enough coins"),
            PetError::UnknownItem(_) => (400, "Unknown item"),
            PetError::UnknownAction(_) => (400, "Unknown action"),
            PetError::StoreError(_) | PetError::Conflict { .. } => (500, "Database error"),
            _ => (500, "Internal error"),
        };
        Ok(FrameResponse {
            status,
            content_type: "application/json",
            body: serde_json::to_string(&ErrorBody { error: message })?,
        })
    }
}

fn meta(property: &str, content: &str) -> String {
    format!("<meta property=\"{property}\" content=\"{content}\" />\n")
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

//! Meter readings page: retrieval, and the scanner that rebuilds the
//! register time series from it.
//!
//! The readings page is loosely structured markup with no schema: each
//! reading appears as a channel label ("Pobór:" or "Oddanie:"), followed
//! somewhere later by a `DD.MM.YYYY (HH:MM:SS)` timestamp, followed by the
//! six-digit register value inside a `<span>`. The scanner walks the
//! document's token stream (tag-open, text, tag-close events from the
//! parsed tree) with an explicit state machine and emits one
//! [`MeterReading`] per completed label/timestamp/value triple, in
//! document order.

use crate::elicznik::client::Session;
use crate::elicznik::helper::parse_reading_timestamp;
use crate::error::PortalError;
use crate::model::{Channel, MeterReading};
use chrono::NaiveDateTime;
use ego_tree::iter::Edge;
use scraper::{Html, Node};

const READINGS_PATH: &str = "/odczyty";

const CONSUMPTION_LABEL: &str = "Pobór:";
const PRODUCTION_LABEL: &str = "Oddanie:";

/// Register values are printed as exactly six digits.
const REGISTER_DIGITS: usize = 6;

/// Fetches the raw readings page using the authenticated session.
pub async fn fetch_readings_page(session: &Session) -> Result<String, PortalError> {
    session.get(READINGS_PATH).await
}

/// Scanner states.
///
/// Only three token shapes cause transitions: a channel label, a reading
/// timestamp, and a six-digit register value inside a span. Everything
/// else is passed over.
enum ScanState {
    /// Scanning for a channel label
    Idle,
    /// Label found, scanning for its timestamp
    LabelSeen(Channel),
    /// Label and timestamp found, scanning for the register value
    TimestampSeen(Channel, NaiveDateTime),
}

/// Reconstructs the ordered sequence of register readings from the page.
///
/// Holds no state between invocations. Never fails: a label with no
/// matching timestamp/value pair behind it is a normal trailing fragment
/// of the page and is dropped without a reading.
pub fn parse_readings(page: &str) -> Vec<MeterReading> {
    let document = Html::parse_document(page);
    let mut readings = Vec::new();
    let mut state = ScanState::Idle;
    let mut span_depth: usize = 0;

    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => {
                    if element.name() == "span" {
                        span_depth += 1;
                    }
                }
                Node::Text(text) => {
                    state = scan_text(state, text.trim(), span_depth > 0, &mut readings);
                }
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if element.name() == "span" {
                        span_depth = span_depth.saturating_sub(1);
                    }
                }
            }
        }
    }

    readings
}

fn scan_text(
    state: ScanState,
    text: &str,
    inside_span: bool,
    readings: &mut Vec<MeterReading>,
) -> ScanState {
    // A label re-arms the scanner from any state; an unfinished fragment
    // before it is dropped.
    if let Some(channel) = channel_for_label(text) {
        return ScanState::LabelSeen(channel);
    }

    match state {
        ScanState::Idle => ScanState::Idle,
        ScanState::LabelSeen(channel) => match parse_reading_timestamp(text) {
            Some(timestamp) => ScanState::TimestampSeen(channel, timestamp),
            // The label stays armed until its timestamp shows up.
            None => ScanState::LabelSeen(channel),
        },
        ScanState::TimestampSeen(channel, timestamp) => {
            // Six digits outside the span container must not terminate the
            // scan; the register value only ever appears inside one.
            if inside_span {
                if let Some(register_value) = parse_register_value(text) {
                    readings.push(MeterReading {
                        timestamp,
                        channel,
                        register_value,
                    });
                    return ScanState::Idle;
                }
            }
            ScanState::TimestampSeen(channel, timestamp)
        }
    }
}

fn channel_for_label(text: &str) -> Option<Channel> {
    match text {
        CONSUMPTION_LABEL => Some(Channel::Consumption),
        PRODUCTION_LABEL => Some(Channel::Production),
        _ => None,
    }
}

fn parse_register_value(text: &str) -> Option<u32> {
    if text.len() == REGISTER_DIGITS && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

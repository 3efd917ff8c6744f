//! # Import/Export Codec
//!
//! Two JSON documents leave the store:
//!
//! ```text
//! export bundle     {"invoices": [...], "clients": [...]}
//! persisted record  {"state": {"currentInvoice": ..., "invoices": [...],
//!                              "clients": [...], "nextInvoiceNumber": "..."},
//!                    "version": 0}
//! ```
//!
//! Field names match the web form (`vatType`, `vatAmount`, `vatBreakdown`,
//! `totals.vat`). Amounts are written as decimal strings and read from
//! strings or JSON numbers.
//!
//! Decoding is all-or-nothing: one bad invoice rejects the whole document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use facture_core::{ClientDetails, Invoice};

use crate::error::{CodecError, CodecResult};

/// Version written into the persisted record.
pub const PERSIST_VERSION: u32 = 0;

// =============================================================================
// Documents
// =============================================================================

/// Everything the store owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// The invoice being edited, if any.
    #[serde(default)]
    pub current_invoice: Option<Invoice>,
    /// Saved invoices, unique by id, in save order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clients: Vec<ClientDetails>,
    /// Number the next created invoice receives.
    #[serde(default)]
    pub next_invoice_number: String,
}

/// The export/import document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clients: Vec<ClientDetails>,
}

/// What an import replaced the collections with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub invoices: usize,
    pub clients: usize,
}

impl From<&ExportBundle> for ImportSummary {
    fn from(bundle: &ExportBundle) -> Self {
        ImportSummary {
            invoices: bundle.invoices.len(),
            clients: bundle.clients.len(),
        }
    }
}

#[derive(Serialize)]
struct PersistedRecordRef<'a> {
    state: &'a StoreState,
    version: u32,
}

#[derive(Deserialize)]
struct PersistedRecord {
    state: StoreState,
    #[serde(default)]
    version: u32,
}

/// `null` and a missing field both mean "empty".
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Export Bundle
// =============================================================================

/// Serializes the saved invoices and clients.
pub fn encode_bundle(invoices: &[Invoice], clients: &[ClientDetails]) -> CodecResult<String> {
    #[derive(Serialize)]
    struct BundleRef<'a> {
        invoices: &'a [Invoice],
        clients: &'a [ClientDetails],
    }

    serde_json::to_string_pretty(&BundleRef { invoices, clients })
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parses an export document.
///
/// ## Example
/// ```rust
/// use facture_store::codec::decode_bundle;
///
/// let bundle = decode_bundle(r#"{"clients": []}"#).unwrap();
/// assert!(bundle.invoices.is_empty());
///
/// assert!(decode_bundle("not json").is_err());
/// assert!(decode_bundle("[1, 2]").is_err());
/// ```
pub fn decode_bundle(data: &str) -> CodecResult<ExportBundle> {
    let value = parse_object(data)?;
    serde_json::from_value(value).map_err(|e| CodecError::Malformed(e.to_string()))
}

// =============================================================================
// Persisted Record
// =============================================================================

/// Serializes the full store state into the persisted envelope.
pub fn encode_record(state: &StoreState) -> CodecResult<String> {
    serde_json::to_string(&PersistedRecordRef {
        state,
        version: PERSIST_VERSION,
    })
    .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parses a persisted envelope back into the store state.
pub fn decode_record(data: &str) -> CodecResult<StoreState> {
    let value = parse_object(data)?;
    let record: PersistedRecord =
        serde_json::from_value(value).map_err(|e| CodecError::Malformed(e.to_string()))?;

    if record.version != PERSIST_VERSION {
        tracing::warn!(
            version = record.version,
            expected = PERSIST_VERSION,
            "Persisted record has an unknown version"
        );
    }
    Ok(record.state)
}

fn parse_object(data: &str) -> CodecResult<Value> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| CodecError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(CodecError::Malformed(
            "expected a JSON object at the top level".to_string(),
        ));
    }
    Ok(value)
}

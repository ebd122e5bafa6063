use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;

use crate::snapshot::TickSnapshot;

const SNAPSHOT_DOMAIN: &str = "pursuit";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "pursuit:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes the snapshot into a single-line string suitable for clipboard transfer.
pub(crate) fn encode(snapshot: &TickSnapshot) -> Result<String, SnapshotTransferError> {
    let json = serde_json::to_vec(snapshot).map_err(SnapshotTransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    let (columns, rows) = snapshot.dimensions();
    Ok(format!("{SNAPSHOT_HEADER}:{columns}x{rows}:{encoded}"))
}

/// Decodes a snapshot from the provided string representation.
pub(crate) fn decode(value: &str) -> Result<TickSnapshot, SnapshotTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SnapshotTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(SnapshotTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(SnapshotTransferError::MissingVersion)?;
    let dimensions = parts
        .next()
        .ok_or(SnapshotTransferError::MissingDimensions)?;
    let payload = parts.next().ok_or(SnapshotTransferError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(SnapshotTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotTransferError::UnsupportedVersion(
            version.to_owned(),
        ));
    }

    let (columns, rows) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(SnapshotTransferError::InvalidEncoding)?;
    let snapshot: TickSnapshot =
        serde_json::from_slice(&bytes).map_err(SnapshotTransferError::InvalidPayload)?;

    let found = snapshot.dimensions();
    if found != (columns, rows) {
        return Err(SnapshotTransferError::DimensionMismatch {
            declared: (columns, rows),
            found,
        });
    }

    Ok(snapshot)
}

/// Reports whether `value` looks like an encoded transfer string.
pub(crate) fn is_transfer_string(value: &str) -> bool {
    value
        .trim_start()
        .strip_prefix(SNAPSHOT_HEADER)
        .is_some_and(|rest| rest.starts_with(FIELD_DELIMITER))
}

/// Errors that can occur while decoding snapshot transfer strings.
#[derive(Debug, Error)]
pub(crate) enum SnapshotTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("snapshot payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("snapshot string is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("snapshot string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    #[error("snapshot string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("snapshot string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("snapshot prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("snapshot version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded snapshot.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The declared dimensions disagree with the decoded rows.
    #[error(
        "snapshot declares a {}x{} grid but holds {}x{}",
        .declared.0,
        .declared.1,
        .found.0,
        .found.1
    )]
    DimensionMismatch {
        /// Dimensions written in the header.
        declared: (u32, u32),
        /// Dimensions of the decoded rows.
        found: (u32, u32),
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode snapshot payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    #[error("could not parse snapshot payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), SnapshotTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;

    Ok((columns, rows))
}

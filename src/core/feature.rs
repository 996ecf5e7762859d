//! Purpose: Centralize protocol feature gating by minimum protocol version.
//! Exports: `Feature`, `PROTOCOL_VERSION`.
//! Role: Shared policy for versioned decoders; fields are gated by feature, never by raw numbers.
//! Invariants: The table is additive; a feature's minimum version never changes once published.
//! Invariants: `Feature::is_in` is a pure comparison with no hidden state.
use std::fmt;

/// Newest protocol revision this crate can speak.
pub const PROTOCOL_VERSION: u32 = 54460;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Feature {
    TempTables,
    BlockInfo,
    ClientInfo,
    Timezone,
    QuotaKeyInClientInfo,
    DisplayName,
    VersionPatch,
    ServerLogs,
    ColumnDefaultsMetadata,
    ClientWriteInfo,
    SettingsSerializedAsStrings,
    InterServerSecret,
    OpenTelemetry,
    XForwardedForInClientInfo,
    RefererInClientInfo,
    DistributedDepth,
    QueryStartTime,
    ProfileEvents,
    ParallelReplicas,
    CustomSerialization,
    QuotaKey,
    Addendum,
    Parameters,
    ServerQueryTimeInProgress,
}

impl Feature {
    pub const ALL: &'static [Feature] = &[
        Feature::TempTables,
        Feature::BlockInfo,
        Feature::ClientInfo,
        Feature::Timezone,
        Feature::QuotaKeyInClientInfo,
        Feature::DisplayName,
        Feature::VersionPatch,
        Feature::ServerLogs,
        Feature::ColumnDefaultsMetadata,
        Feature::ClientWriteInfo,
        Feature::SettingsSerializedAsStrings,
        Feature::InterServerSecret,
        Feature::OpenTelemetry,
        Feature::XForwardedForInClientInfo,
        Feature::RefererInClientInfo,
        Feature::DistributedDepth,
        Feature::QueryStartTime,
        Feature::ProfileEvents,
        Feature::ParallelReplicas,
        Feature::CustomSerialization,
        Feature::QuotaKey,
        Feature::Addendum,
        Feature::Parameters,
        Feature::ServerQueryTimeInProgress,
    ];

    /// First protocol version at which the feature's fields are on the wire.
    pub fn min_version(self) -> u32 {
        match self {
            Feature::TempTables => 50264,
            Feature::BlockInfo => 51903,
            Feature::ClientInfo => 54032,
            Feature::Timezone => 54058,
            Feature::QuotaKeyInClientInfo => 54060,
            Feature::DisplayName => 54372,
            Feature::VersionPatch => 54401,
            Feature::ServerLogs => 54406,
            Feature::ColumnDefaultsMetadata => 54410,
            Feature::ClientWriteInfo => 54420,
            Feature::SettingsSerializedAsStrings => 54429,
            Feature::InterServerSecret => 54441,
            Feature::OpenTelemetry => 54442,
            Feature::XForwardedForInClientInfo => 54443,
            Feature::RefererInClientInfo => 54447,
            Feature::DistributedDepth => 54448,
            Feature::QueryStartTime => 54449,
            Feature::ProfileEvents => 54451,
            Feature::ParallelReplicas => 54453,
            Feature::CustomSerialization => 54454,
            Feature::QuotaKey => 54458,
            Feature::Addendum => 54458,
            Feature::Parameters => 54459,
            Feature::ServerQueryTimeInProgress => 54460,
        }
    }

    pub fn is_in(self, version: u32) -> bool {
        version >= self.min_version()
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::TempTables => "TempTables",
            Feature::BlockInfo => "BlockInfo",
            Feature::ClientInfo => "ClientInfo",
            Feature::Timezone => "Timezone",
            Feature::QuotaKeyInClientInfo => "QuotaKeyInClientInfo",
            Feature::DisplayName => "DisplayName",
            Feature::VersionPatch => "VersionPatch",
            Feature::ServerLogs => "ServerLogs",
            Feature::ColumnDefaultsMetadata => "ColumnDefaultsMetadata",
            Feature::ClientWriteInfo => "ClientWriteInfo",
            Feature::SettingsSerializedAsStrings => "SettingsSerializedAsStrings",
            Feature::InterServerSecret => "InterServerSecret",
            Feature::OpenTelemetry => "OpenTelemetry",
            Feature::XForwardedForInClientInfo => "XForwardedForInClientInfo",
            Feature::RefererInClientInfo => "RefererInClientInfo",
            Feature::DistributedDepth => "DistributedDepth",
            Feature::QueryStartTime => "QueryStartTime",
            Feature::ProfileEvents => "ProfileEvents",
            Feature::ParallelReplicas => "ParallelReplicas",
            Feature::CustomSerialization => "CustomSerialization",
            Feature::QuotaKey => "QuotaKey",
            Feature::Addendum => "Addendum",
            Feature::Parameters => "Parameters",
            Feature::ServerQueryTimeInProgress => "ServerQueryTimeInProgress",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.min_version())
    }
}

#[cfg(test)]
mod tests {
    use super::{Feature, PROTOCOL_VERSION};

    #[test]
    fn gate_is_inclusive_at_min_version() {
        let gate = Feature::ClientWriteInfo;
        assert!(!gate.is_in(gate.min_version() - 1));
        assert!(gate.is_in(gate.min_version()));
        assert!(gate.is_in(gate.min_version() + 1));
        assert!(!gate.is_in(0));
    }

    #[test]
    fn every_feature_is_active_at_current_version() {
        for feature in Feature::ALL {
            assert!(feature.is_in(PROTOCOL_VERSION), "{feature}");
        }
    }

    #[test]
    fn table_is_ordered_by_min_version() {
        let versions: Vec<u32> = Feature::ALL.iter().map(|f| f.min_version()).collect();
        assert!(versions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn display_names_feature_and_version() {
        assert_eq!(Feature::ClientWriteInfo.to_string(), "ClientWriteInfo(54420)");
    }
}

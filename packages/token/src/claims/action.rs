//! Closed set of grantable actions and their typed parameters

use bincode::{Decode, Encode};
use std::fmt;

/// Actions a token can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Upload a guild or group icon
    UploadIcon,
    /// Upload a message attachment
    UploadAttachment,
    /// Upload a user avatar
    UploadAvatar,
    /// Download a prepared data export
    AccessDataExport,
}

impl ActionKind {
    /// Every known action, in tag order
    pub const ALL: [ActionKind; 4] = [
        ActionKind::UploadIcon,
        ActionKind::UploadAttachment,
        ActionKind::UploadAvatar,
        ActionKind::AccessDataExport,
    ];

    /// Wire tag written into encoded claims
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::UploadIcon => "upload_icon",
            ActionKind::UploadAttachment => "upload_attachment",
            ActionKind::UploadAvatar => "upload_avatar",
            ActionKind::AccessDataExport => "access_data_export",
        }
    }

    /// Look up an action by wire tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of an icon upload grant.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct UploadIconParams {
    /// Identifier the stored icon will get
    pub id: String,
    /// Largest accepted upload, in bytes
    pub max_size: u64,
    /// Whether the bearer may skip server-side compression
    pub allow_uncompressed: bool,
}

/// Parameters of an attachment upload grant.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct UploadAttachmentParams {
    /// Identifier the stored attachment will get
    pub id: String,
    /// Uploading user, recorded as the attachment owner
    pub user_id: String,
    /// Largest accepted upload, in bytes
    pub max_size: u64,
}

/// Parameters of an avatar upload grant.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct UploadAvatarParams {
    /// Identifier the stored avatar will get
    pub id: String,
    /// Largest accepted upload, in bytes
    pub max_size: u64,
}

/// Parameters of a data export download grant.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct DataExportParams {
    /// Object name of the export archive
    pub id: String,
}

/// Action-specific parameters, one variant per [`ActionKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionParams {
    /// Grant for [`ActionKind::UploadIcon`]
    UploadIcon(UploadIconParams),
    /// Grant for [`ActionKind::UploadAttachment`]
    UploadAttachment(UploadAttachmentParams),
    /// Grant for [`ActionKind::UploadAvatar`]
    UploadAvatar(UploadAvatarParams),
    /// Grant for [`ActionKind::AccessDataExport`]
    AccessDataExport(DataExportParams),
}

impl ActionParams {
    /// The action these parameters belong to
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            ActionParams::UploadIcon(_) => ActionKind::UploadIcon,
            ActionParams::UploadAttachment(_) => ActionKind::UploadAttachment,
            ActionParams::UploadAvatar(_) => ActionKind::UploadAvatar,
            ActionParams::AccessDataExport(_) => ActionKind::AccessDataExport,
        }
    }

    /// Size limit carried by upload grants
    #[must_use]
    pub fn max_size(&self) -> Option<u64> {
        match self {
            ActionParams::UploadIcon(p) => Some(p.max_size),
            ActionParams::UploadAttachment(p) => Some(p.max_size),
            ActionParams::UploadAvatar(p) => Some(p.max_size),
            ActionParams::AccessDataExport(_) => None,
        }
    }
}

impl From<UploadIconParams> for ActionParams {
    fn from(params: UploadIconParams) -> Self {
        ActionParams::UploadIcon(params)
    }
}

impl From<UploadAttachmentParams> for ActionParams {
    fn from(params: UploadAttachmentParams) -> Self {
        ActionParams::UploadAttachment(params)
    }
}

impl From<UploadAvatarParams> for ActionParams {
    fn from(params: UploadAvatarParams) -> Self {
        ActionParams::UploadAvatar(params)
    }
}

impl From<DataExportParams> for ActionParams {
    fn from(params: DataExportParams) -> Self {
        ActionParams::AccessDataExport(params)
    }
}

//! Tool definitions module.
//!
//! Every tool is a [`ZoneTool`] over the parameter struct of one registrar
//! operation. Single-record creation lives in `records`, zone-wide operations
//! in `zone`.

pub mod common;
pub mod operation;
pub mod records;
pub mod validation;
pub mod zone;

pub use operation::{ToolHints, ZoneOperation, ZoneTool};
pub use records::{
    AddAaaaRecordParams, AddARecordParams, AddCaaRecordParams, AddCnameRecordParams,
    AddMxRecordParams, AddNsRecordParams, AddSrvRecordParams, AddTxtRecordParams,
};
pub use zone::{
    ClearZoneParams, GetRecordsParams, RecordListing, RemoveRecordParams, UpdateRecordsParams,
    UpdateSoaParams,
};

pub type GetRecordsTool = ZoneTool<GetRecordsParams>;
pub type AddARecordTool = ZoneTool<AddARecordParams>;
pub type AddAaaaRecordTool = ZoneTool<AddAaaaRecordParams>;
pub type AddCnameRecordTool = ZoneTool<AddCnameRecordParams>;
pub type AddMxRecordTool = ZoneTool<AddMxRecordParams>;
pub type AddTxtRecordTool = ZoneTool<AddTxtRecordParams>;
pub type AddNsRecordTool = ZoneTool<AddNsRecordParams>;
pub type AddSrvRecordTool = ZoneTool<AddSrvRecordParams>;
pub type AddCaaRecordTool = ZoneTool<AddCaaRecordParams>;
pub type RemoveRecordTool = ZoneTool<RemoveRecordParams>;
pub type UpdateRecordsTool = ZoneTool<UpdateRecordsParams>;
pub type UpdateSoaTool = ZoneTool<UpdateSoaParams>;
pub type ClearZoneTool = ZoneTool<ClearZoneParams>;

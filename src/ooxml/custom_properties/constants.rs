//! Fixed values of the custom file properties part.
//!
//! The part location, content type and relationship type are what the
//! surrounding package layer needs to find or register `docProps/custom.xml`.

/// Format ID every custom property carries.
pub const FORMAT_ID: &str = "{D5CDD505-2E9C-101B-9397-08002B2CF9AE}";

/// First usable property ID. 0 and 1 are reserved by the format.
pub const FIRST_PID: i32 = 2;

/// Namespace of the `Properties` root and its `property` children.
pub const CUSTOM_PROPERTIES_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/custom-properties";

/// File Properties Variant Type namespace, bound to the `vt` prefix.
pub const VTYPES_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes";

/// Prefix the variant type namespace is bound to on output.
pub const VT_PREFIX: &str = "vt";

/// Conventional part name inside the package.
pub const PART_NAME: &str = "/docProps/custom.xml";

/// Content type of the custom properties part.
pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.custom-properties+xml";

/// Package-level relationship type pointing at the part.
pub const RELATIONSHIP_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/custom-properties";

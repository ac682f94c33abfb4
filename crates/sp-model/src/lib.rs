pub mod area;
pub mod ids;
pub mod metadata;
pub mod table;

pub use area::{AREA_PRECEDENCE, COMBINE_ORDER, precedence_rank, short_code};
pub use ids::{COMMISSIONED_ALLOW_LIST, DatasetFamily, ResolvedId, strip_suffix_char};
pub use metadata::{AreaType, ClassificationMapping, MetadataRecord, VariableRef};
pub use table::{ExtractTable, TidyTable};

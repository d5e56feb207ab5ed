//! Well-known store keys shared by producer and consumer.
//!
//! Both processes address the store by these exact names; changing one side
//! without the other silently severs the data flow.

/// Serialized [`LibraryPayload`](crate::library::LibraryPayload) blob (JSON).
pub const LIBRARY_DATA: &str = "library_data";

/// RFC 3339 timestamp of the producer's last write.
pub const LAST_UPDATE_TIME: &str = "last_update_time";

/// Id of the library the producer last selected.
pub const CURRENT_ANSWER_LIBRARY: &str = "current_answer_library";

/// Library id assumed when [`CURRENT_ANSWER_LIBRARY`] is absent.
pub const DEFAULT_LIBRARY_ID: &str = "mao_zedong";

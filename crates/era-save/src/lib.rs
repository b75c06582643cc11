//! Era Save -- persistence plumbing for the era tycoon.
//!
//! Slot blobs, the slot registry and the active-slot id live in a
//! [`SaveStorage`] under keys named by a [`StorageLayout`]. Whole saves move
//! between machines as obfuscated `.chronicle` archives; import understands
//! every archive layout earlier releases wrote.
//!
//! ```rust
//! use era_save::{MemoryStorage, StorageLayout, export_archive, import_archive};
//!
//! let layout = StorageLayout::default();
//! let source = MemoryStorage::new();
//! let file = export_archive(&source, &layout, 1_700_000_000_000).unwrap();
//! assert!(file.file_name.ends_with(".chronicle"));
//!
//! let mut target = MemoryStorage::new();
//! let summary = import_archive(&mut target, &layout, &file.contents, 0).unwrap();
//! assert!(summary.slots_written.is_empty());
//! ```

pub mod archive;
pub mod codec;
pub mod error;
pub mod layout;
pub mod slots;
pub mod storage;
pub mod transfer;

pub use archive::{Archive, ArchiveShape, parse_archive};
pub use error::{ExportError, ImportError, PersistError, StorageError};
pub use layout::StorageLayout;
pub use storage::{DirStorage, MemoryStorage, SaveStorage};
pub use transfer::{ExportFile, ImportSummary, export_archive, import_archive};

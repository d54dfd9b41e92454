#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cell builder system converting carved grid cells into entity descriptors.
//!
//! A [`BuilderTable`] maps every [`CellCode`] to one [`CellBuilder`]. Builders
//! never fail; they attach a texture, a footprint and an interaction
//! [`Responder`] to each cell for the caller's scene layer to instantiate.

use std::fmt;

use cellmaze_core::CellCode;
use glam::Vec2;

mod responder;

pub use responder::{
    Contact, ContactCallback, Overlap, OverlapCallback, Responder, CONTACT_INTERVAL_SECONDS,
};

/// Texture used for path cells by the default table.
pub const DEFAULT_PATH_TEXTURE: &str = "DefaultNoCollideCell";
/// Texture used for border cells by the default table.
pub const DEFAULT_BORDER_TEXTURE: &str = "DefaultCollideCell";
/// Texture used for filler cells by the default table.
pub const DEFAULT_FILLER_TEXTURE: &str = "DefaultFillerCell";
/// Texture used for trigger cells by the default table.
pub const DEFAULT_TRIGGER_TEXTURE: &str = "DefaultTriggerCell";

/// Physical footprint of a built cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Footprint {
    /// Purely visual cell.
    None,
    /// Square collider that blocks movement.
    Collider {
        /// Side lengths of the collider.
        size: Vec2,
    },
    /// Square overlap-only sensor.
    Sensor {
        /// Side lengths of the sensor.
        size: Vec2,
    },
}

/// Entity descriptor produced for a single grid cell.
#[derive(Clone, Debug)]
pub struct CellEntity {
    /// Code of the cell the entity was built from.
    pub code: CellCode,
    /// Centre of the cell in viewport space.
    pub position: Vec2,
    /// Side length of the cell.
    pub width: f32,
    /// Rotation around the viewing axis in degrees.
    pub rotation: f32,
    /// Texture reference for the scene layer.
    pub texture: String,
    /// Physical footprint of the cell.
    pub footprint: Footprint,
    responder: Responder,
}

impl CellEntity {
    /// Interaction behaviour attached to the entity.
    #[must_use]
    pub const fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Forwards a sustained contact to the entity's callback.
    ///
    /// Deliveries are rate limited to one per [`CONTACT_INTERVAL_SECONDS`];
    /// `None` means nothing was delivered.
    pub fn on_contact(&mut self, contact: &Contact) -> Option<bool> {
        self.responder.contact(contact)
    }

    /// Forwards an overlap entry to the entity's callback.
    #[must_use]
    pub fn on_overlap_enter(&self, overlap: &Overlap) -> Option<bool> {
        self.responder.overlap(overlap)
    }
}

/// Variant describing how a grid cell turns into an entity.
#[derive(Clone)]
pub enum CellBuilder {
    /// Visual-only cell.
    Decoration {
        /// Texture reference.
        texture: String,
    },
    /// Colliding cell with an optional contact callback.
    Solid {
        /// Texture reference.
        texture: String,
        /// Callback for sustained contact, `None` for a no-op.
        on_contact: Option<ContactCallback>,
    },
    /// Overlap-only cell with an optional entry callback.
    Trigger {
        /// Texture reference.
        texture: String,
        /// Callback for overlap entries, `None` for a no-op.
        on_overlap: Option<OverlapCallback>,
    },
}

impl CellBuilder {
    /// Creates a visual-only builder.
    #[must_use]
    pub fn decoration(texture: impl Into<String>) -> Self {
        CellBuilder::Decoration {
            texture: texture.into(),
        }
    }

    /// Creates a colliding builder.
    #[must_use]
    pub fn solid(texture: impl Into<String>, on_contact: Option<ContactCallback>) -> Self {
        CellBuilder::Solid {
            texture: texture.into(),
            on_contact,
        }
    }

    /// Creates a trigger builder.
    #[must_use]
    pub fn trigger(texture: impl Into<String>, on_overlap: Option<OverlapCallback>) -> Self {
        CellBuilder::Trigger {
            texture: texture.into(),
            on_overlap,
        }
    }

    /// Texture reference attached to built cells.
    #[must_use]
    pub fn texture(&self) -> &str {
        match self {
            CellBuilder::Decoration { texture }
            | CellBuilder::Solid { texture, .. }
            | CellBuilder::Trigger { texture, .. } => texture,
        }
    }

    /// Builds an unrotated entity for a cell.
    #[must_use]
    pub fn build(&self, code: CellCode, position: Vec2, cell_width: f32) -> CellEntity {
        self.build_rotated(code, position, cell_width, 0.0)
    }

    /// Builds an entity rotated by `rotation` degrees.
    #[must_use]
    pub fn build_rotated(
        &self,
        code: CellCode,
        position: Vec2,
        cell_width: f32,
        rotation: f32,
    ) -> CellEntity {
        let size = Vec2::splat(cell_width);
        let (footprint, responder) = match self {
            CellBuilder::Decoration { .. } => (Footprint::None, Responder::Inert),
            CellBuilder::Solid { on_contact, .. } => (
                Footprint::Collider { size },
                Responder::Contact {
                    callback: on_contact.clone(),
                    last_delivered: None,
                },
            ),
            CellBuilder::Trigger { on_overlap, .. } => (
                Footprint::Sensor { size },
                Responder::Overlap {
                    callback: on_overlap.clone(),
                },
            ),
        };

        CellEntity {
            code,
            position,
            width: cell_width,
            rotation,
            texture: self.texture().to_owned(),
            footprint,
            responder,
        }
    }
}

impl fmt::Debug for CellBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellBuilder::Decoration { texture } => f
                .debug_struct("Decoration")
                .field("texture", texture)
                .finish(),
            CellBuilder::Solid {
                texture,
                on_contact,
            } => f
                .debug_struct("Solid")
                .field("texture", texture)
                .field("on_contact", &on_contact.is_some())
                .finish(),
            CellBuilder::Trigger {
                texture,
                on_overlap,
            } => f
                .debug_struct("Trigger")
                .field("texture", texture)
                .field("on_overlap", &on_overlap.is_some())
                .finish(),
        }
    }
}

/// Total mapping from cell codes to builders.
#[derive(Clone, Debug)]
pub struct BuilderTable {
    builders: [CellBuilder; 4],
}

impl BuilderTable {
    /// Creates a table from one builder per code.
    #[must_use]
    pub fn new(
        path: CellBuilder,
        border: CellBuilder,
        filler: CellBuilder,
        trigger: CellBuilder,
    ) -> Self {
        Self {
            builders: [path, border, filler, trigger],
        }
    }

    /// Builder responsible for `code`.
    #[must_use]
    pub fn builder(&self, code: CellCode) -> &CellBuilder {
        &self.builders[usize::from(code.value())]
    }

    /// Replaces the builder responsible for `code`.
    pub fn set(&mut self, code: CellCode, builder: CellBuilder) {
        tracing::debug!(?code, texture = builder.texture(), "replaced cell builder");
        self.builders[usize::from(code.value())] = builder;
    }

    /// Builds the entity for one cell with the matching builder.
    #[must_use]
    pub fn build(&self, code: CellCode, position: Vec2, cell_width: f32) -> CellEntity {
        self.builder(code).build(code, position, cell_width)
    }
}

impl Default for BuilderTable {
    fn default() -> Self {
        Self::new(
            CellBuilder::decoration(DEFAULT_PATH_TEXTURE),
            CellBuilder::solid(DEFAULT_BORDER_TEXTURE, None),
            CellBuilder::decoration(DEFAULT_FILLER_TEXTURE),
            CellBuilder::trigger(DEFAULT_TRIGGER_TEXTURE, None),
        )
    }
}

//! LwM2M addressing for the single resource this device exposes.
//!
//! The conveyor power state is published as IPSO "Digital Input State"
//! (object 3200, resource 5500) on instance 0.

use core::fmt;

/// IPSO Digital Input object.
pub const DIGITAL_INPUT_OBJECT_ID: u16 = 3200;
/// Instance carrying the conveyor power state.
pub const POWER_INSTANCE_ID: u16 = 0;
/// Digital Input State resource.
pub const DIGITAL_INPUT_STATE_RESOURCE_ID: u16 = 5500;

/// An object-instance path (`/3200/0`) or resource path (`/3200/0/5500`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    pub object_id: u16,
    pub instance_id: u16,
    pub resource_id: Option<u16>,
}

impl ResourcePath {
    pub const fn instance(object_id: u16, instance_id: u16) -> Self {
        Self {
            object_id,
            instance_id,
            resource_id: None,
        }
    }

    pub const fn resource(object_id: u16, instance_id: u16, resource_id: u16) -> Self {
        Self {
            object_id,
            instance_id,
            resource_id: Some(resource_id),
        }
    }

    /// `/3200/0`
    pub const fn power_instance() -> Self {
        Self::instance(DIGITAL_INPUT_OBJECT_ID, POWER_INSTANCE_ID)
    }

    /// `/3200/0/5500`
    pub const fn power_state() -> Self {
        Self::resource(
            DIGITAL_INPUT_OBJECT_ID,
            POWER_INSTANCE_ID,
            DIGITAL_INPUT_STATE_RESOURCE_ID,
        )
    }

    /// The instance this path belongs to.
    pub const fn parent_instance(&self) -> Self {
        Self::instance(self.object_id, self.instance_id)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.object_id, self.instance_id)?;
        if let Some(rid) = self.resource_id {
            write!(f, "/{rid}")?;
        }
        Ok(())
    }
}

/// Object + resource metadata registered with the client once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefinition {
    pub object_id: u16,
    pub object_name: &'static str,
    pub resource_id: u16,
    pub resource_name: &'static str,
    /// Value type as the client tools spell it (`boolean`, `integer`, ...).
    pub resource_type: &'static str,
    pub multiple_instances: bool,
    pub required: bool,
    /// Permitted operations (`r`, `w`, `rw`).
    pub operations: &'static str,
}

impl ResourceDefinition {
    /// The read-only boolean mirroring conveyor power.
    pub const fn power_state() -> Self {
        Self {
            object_id: DIGITAL_INPUT_OBJECT_ID,
            object_name: "Digital Input",
            resource_id: DIGITAL_INPUT_STATE_RESOURCE_ID,
            resource_name: "Digital Input State",
            resource_type: "boolean",
            multiple_instances: false,
            required: false,
            operations: "r",
        }
    }
}

use remediation_core::error::AdapterError;

/// Compute-control collaborator. One call requests one reboot.
pub trait InstanceController {
    fn reboot_instance(&self, instance_id: &str) -> Result<(), AdapterError>;
}

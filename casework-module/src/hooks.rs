use casework_status::ModuleStatus;

use crate::host::HostBridge;

/// Subscribe a module to a named host hook. Arguments are forwarded to the
/// host untouched; the boolean it answers is translated into a status.
pub fn register_to_hook(
    host: &dyn HostBridge,
    module_id: u64,
    hook_name: &str,
    manual_hook_name: Option<&str>,
    run_asynchronously: bool,
) -> ModuleStatus {
    if host.register_hook(module_id, hook_name, manual_hook_name, run_asynchronously) {
        ModuleStatus::success().with_message(format!("Registered to hook {hook_name}"))
    } else {
        ModuleStatus::unexpected_result()
            .with_message(format!("Could not register to hook {hook_name}"))
    }
}

/// Drop a module's subscription to a named host hook.
pub fn deregister_from_hook(host: &dyn HostBridge, module_id: u64, hook_name: &str) -> ModuleStatus {
    if host.deregister_hook(module_id, hook_name) {
        ModuleStatus::success().with_message(format!("Deregistered from hook {hook_name}"))
    } else {
        ModuleStatus::unexpected_result()
            .with_message(format!("Could not deregister from hook {hook_name}"))
    }
}

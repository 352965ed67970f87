//! Device selection for ASR inference.

use std::path::Path;

use crate::application::ports::Device;
use crate::config::DevicePreference;

/// 检查本机是否有可用的 CUDA 设备
///
/// `CUDA_VISIBLE_DEVICES` 为空或 `-1` 表示显式禁用
pub fn cuda_available() -> bool {
    match std::env::var("CUDA_VISIBLE_DEVICES") {
        Ok(devices) => {
            let devices = devices.trim();
            !devices.is_empty() && devices != "-1" && devices != "NoDevFiles"
        }
        Err(_) => Path::new("/dev/nvidia0").exists(),
    }
}

/// 按偏好选择设备
pub fn select_device(preference: DevicePreference, cuda_available: bool) -> Device {
    match preference {
        DevicePreference::Cpu => Device::Cpu,
        DevicePreference::Cuda => Device::Cuda(0),
        DevicePreference::Auto if cuda_available => Device::Cuda(0),
        DevicePreference::Auto => Device::Cpu,
    }
}

/// 启动时解析设备，只执行一次
pub fn resolve_device(preference: DevicePreference) -> Device {
    let available = cuda_available();
    if matches!(preference, DevicePreference::Cuda) && !available {
        tracing::warn!("CUDA requested but no device detected");
    }
    let device = select_device(preference, available);
    tracing::info!(
        device = %device,
        accelerated = device.is_accelerated(),
        ?preference,
        "Inference device selected"
    );
    device
}

//! Camera orbit around the explosion after a crash.

use ringrunner_core::constants::{CAMERA_ORBIT_RADIUS, CAMERA_ORBIT_SPEED};
use ringrunner_core::types::Position;

use crate::session::CameraRig;

/// Place the camera on its orbit around `center` and advance the angle.
/// Height is kept; the camera looks at the center, which cancels any banking.
pub fn orbit(camera: &mut CameraRig, center: Position) {
    camera.position.x = center.x + CAMERA_ORBIT_RADIUS * camera.orbit_angle.sin();
    camera.position.z = center.z + CAMERA_ORBIT_RADIUS * camera.orbit_angle.cos();
    camera.orbit_angle += CAMERA_ORBIT_SPEED;
    camera.roll = 0.0;
    camera.look_at = Some(center);
}

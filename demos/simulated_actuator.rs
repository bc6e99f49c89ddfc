//! Runs the actuator against a simulated H-bridge and drives it the way a
//! BLE client would: through raw characteristic writes and reads.
//!
//! ```text
//! RUST_LOG=debug cargo run --example simulated_actuator
//! ```

use std::time::Duration;

use ble_actuator::config::parse_config;
use ble_actuator::motor::{run_sweep, SimulatedDriver};
use ble_actuator::protocol::{Characteristic, StatusFrame};
use ble_actuator::{Actuator, MotionController, MotorService, ThreadDelay};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
[motor]
name = "demo slider"
stroke_length_mm = 20.0

[speed]
default_delay_ms = 2

[protocol]
position_encoding = "percent"
"#;

fn print_status(service: &MotorService<ble_actuator::ActuatorHandle>) -> Result<(), Box<dyn std::error::Error>> {
    let raw = service.read(Characteristic::Status)?;
    let frame = StatusFrame::decode(&raw)?;
    println!(
        "status={:<8} position={:>5} fault={}",
        frame.status.name(),
        frame.position,
        frame.fault
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let config = parse_config(CONFIG)?;

    let mut driver = SimulatedDriver::new();
    let probe = driver.probe();

    let report = run_sweep(&mut driver, &mut ThreadDelay, 8, 1)?;
    println!("self-test: {:?}", report);

    let controller = MotionController::from_config(driver, &config)?;
    let actuator = Actuator::spawn(controller, ThreadDelay)?;
    let service = MotorService::from_config(actuator.handle(), &config.protocol);

    // Move to 50% of the stroke.
    service.write(Characteristic::Position, &50i16.to_le_bytes())?;
    for _ in 0..5 {
        std::thread::sleep(Duration::from_millis(500));
        print_status(&service)?;
    }

    // Inject a driver fault mid-move, then release it.
    service.write(Characteristic::Command, &[1, 0x00, 0x00])?;
    std::thread::sleep(Duration::from_millis(300));
    probe.set_fault(true);
    std::thread::sleep(Duration::from_millis(200));
    print_status(&service)?;
    probe.set_fault(false);
    std::thread::sleep(Duration::from_millis(1500));
    print_status(&service)?;

    // Home and disable.
    service.write(Characteristic::Command, &[3, 0, 0])?;
    std::thread::sleep(Duration::from_secs(3));
    service.write(Characteristic::Command, &[6, 0, 0])?;
    std::thread::sleep(Duration::from_millis(200));
    print_status(&service)?;

    actuator.shutdown()?;
    Ok(())
}

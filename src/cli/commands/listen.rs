use std::time::Duration;

use anyhow::Result;
use aprilaire_hub_rs::attributes;
use tokio::time::{Instant, interval, sleep_until};

use crate::Params;
use crate::utils::{create_session, print_entity};

pub async fn listen(params: &Params, seconds: u64) -> Result<()> {
    let session = create_session(params).await?;
    let mut revisions = session.coordinator.store().subscribe();
    let deadline = sleep_until(Instant::now() + Duration::from_secs(seconds));
    tokio::pin!(deadline);

    let thermostat = session.thermostat.clone();
    let wall_unit = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(2));
        let mut humidity = 35;
        loop {
            ticker.tick().await;
            humidity = if humidity >= 45 { 35 } else { humidity + 1 };
            thermostat
                .inject(attributes! {
                    IndoorHumidityControllingSensorValue => humidity,
                    HumidificationStatus => if humidity < 40 { 2 } else { 1 },
                })
                .await;
        }
    });

    println!("Listening for {} seconds, press Ctrl+C to stop", seconds);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let revision = *revisions.borrow_and_update();
                println!("--- revision {} ---", revision);
                if let Some(info) = session.coordinator.refresh_device_info() {
                    println!("Device info changed: {:?}", info);
                }
                for entity in &session.entities {
                    print_entity(entity)?;
                }
            }
        }
    }

    wall_unit.abort();
    Ok(())
}

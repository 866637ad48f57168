use anyhow::Result;
use aprilaire_hub_rs::entities::Command;

use crate::Params;
use crate::utils::{Session, create_session, print_entity};

pub async fn list_entities(params: &Params, raw: bool) -> Result<()> {
    let session = create_session(params).await?;
    if raw {
        let values = session.coordinator.store().snapshot();
        println!("Attributes: {}", serde_json::to_string_pretty(&values)?);
    }
    if let Some(info) = session.coordinator.device_info() {
        println!("Device: {}", serde_json::to_string_pretty(&info)?);
    }
    for entity in &session.entities {
        print_entity(entity)?;
    }
    Ok(())
}

async fn run(session: &Session, key: &str, command: Command) -> Result<()> {
    let entity = session.entity(key)?;
    println!("Sending {} to {}", command.name(), entity.name());
    entity.execute(command)?.wait().await?;
    print_entity(entity)
}

pub async fn set_humidity(params: &Params, key: &str, value: u8) -> Result<()> {
    let session = create_session(params).await?;
    run(&session, key, Command::SetHumidity(value)).await
}

pub async fn set_number(params: &Params, key: &str, value: f64) -> Result<()> {
    let session = create_session(params).await?;
    run(&session, key, Command::SetValue(value)).await
}

pub async fn select_option(params: &Params, key: &str, option: &str) -> Result<()> {
    let session = create_session(params).await?;
    run(&session, key, Command::SelectOption(option.to_string())).await
}

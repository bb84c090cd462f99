use n2k_alert::*;
use std::io::Write;
use std::time::Duration;

fn coolant_alert(clock: &ManualClock) -> Alert<ManualClock> {
    let mut alert = Alert::with_clock(AlertType::Warning, AlertCategory::Technical, 21, clock.clone())
        .with_support(YesNo::Yes, YesNo::Yes, YesNo::No);
    alert.set_system(5, 1, 0xAB, Language::EnglishUs, "Coolant temperature high", "Engine room");
    alert.set_data_source(0, 2, 0x1122_3344_5566_7788);
    alert.set_threshold(ThresholdMethod::Greater, 0, 60);
    alert
}

fn respond(alert: &Alert<ManualClock>, command: ResponseCommand) -> N2kMessage {
    AlertResponse {
        header: alert.header(),
        acknowledge_network_id: 0xCAFE,
        command,
    }
    .encode()
}

#[test]
fn test_type_and_category_share_first_byte() {
    let alert = Alert::new(AlertType::Warning, AlertCategory::Technical, 1);
    let msg = alert.encode_notification();
    assert_eq!(msg.pgn(), PGN_ALERT_NOTIFICATION);
    assert_eq!(msg.data()[0], 0x15);
}

#[test]
fn test_exceed_then_recover() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);

    assert_eq!(alert.test_threshold(65), ThresholdStatus::Exceeded);
    assert_eq!(alert.state(), AlertState::Active);
    assert_eq!(alert.occurrence(), 1);

    assert_eq!(alert.test_threshold(55), ThresholdStatus::Normal);
    assert_eq!(alert.state(), AlertState::Normal);
    assert_eq!(alert.occurrence(), 0);
}

#[test]
fn test_occurrence_threshold_is_normalized() {
    let mut alert = Alert::new(AlertType::Caution, AlertCategory::Navigational, 2);
    alert.set_occurrence_threshold(0);
    assert_eq!(alert.occurrence_threshold(), 1);
    alert.set_occurrence_threshold(255);
    assert_eq!(alert.occurrence_threshold(), 1);
    alert.set_occurrence_threshold(12);
    assert_eq!(alert.occurrence_threshold(), 12);
}

#[test]
fn test_acknowledge_wins_over_silence() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);
    alert.test_threshold(70);

    assert!(alert.apply_response(&respond(&alert, ResponseCommand::TemporarySilence)));
    alert.test_threshold(70);
    assert_eq!(alert.state(), AlertState::Silenced);

    assert!(alert.apply_response(&respond(&alert, ResponseCommand::Acknowledge)));
    // still Exceeded, so this pass promotes to Acknowledged
    alert.test_threshold(70);
    assert!(alert.is_silent());
    assert!(alert.is_acknowledged());
    assert_eq!(alert.state(), AlertState::Acknowledged);
    assert_eq!(alert.threshold_status(), ThresholdStatus::Acknowledged);
}

#[test]
fn test_silence_expires_on_next_evaluation() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);
    alert.set_temporary_silence_time(30);
    alert.test_threshold(70);

    alert.apply_response(&respond(&alert, ResponseCommand::TemporarySilence));
    assert_eq!(alert.silence_remaining(), Some(Duration::from_secs(30)));

    clock.advance(Duration::from_secs(29));
    alert.test_threshold(70);
    assert!(alert.is_silent());
    assert_eq!(alert.state(), AlertState::Silenced);

    clock.advance(Duration::from_secs(1));
    alert.test_threshold(70);
    assert!(!alert.is_silent());
    assert_eq!(alert.silence_remaining(), None);

    // the flag drops after this pass's state update, the next pass is Active again
    alert.test_threshold(70);
    assert_eq!(alert.state(), AlertState::Active);
}

#[test]
fn test_response_for_other_system_is_ignored() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);
    alert.test_threshold(70);

    let mut header = alert.header();
    header.alert_subsystem = 9;
    let foreign = AlertResponse {
        header,
        acknowledge_network_id: 1,
        command: ResponseCommand::Acknowledge,
    }
    .encode();

    assert!(alert.apply_response(&foreign));
    alert.test_threshold(70);
    assert!(!alert.is_acknowledged());
    assert_eq!(alert.state(), AlertState::Active);
}

#[test]
fn test_non_response_pgn_is_refused() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);
    assert!(!alert.apply_response(&alert.encode_text()));
    assert!(!alert.apply_response(&alert.encode_notification()));
}

#[test]
fn test_notification_reflects_alert() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);
    alert.test_threshold(70);

    let decoded = AlertNotification::decode(&alert.encode_notification()).unwrap();
    assert_eq!(decoded.header.alert_id, 21);
    assert_eq!(decoded.header.source_network_id, 0x1122_3344_5566_7788);
    assert_eq!(decoded.header.occurrence, 1);
    assert_eq!(decoded.state, AlertState::Active);
    assert_eq!(decoded.threshold_status, ThresholdStatus::Exceeded);
    assert_eq!(decoded.acknowledge_support, YesNo::Yes);
    assert_eq!(decoded.escalation_support, YesNo::No);
    assert_eq!(decoded.priority, 100);
    assert_eq!(decoded.trigger_condition, TriggerCondition::Auto);

    let text = AlertText::decode(&alert.encode_text()).unwrap();
    assert_eq!(text.description, "Coolant temperature high");
    assert_eq!(text.location, "Engine room");
}

#[test]
fn test_manager_from_yaml_file() {
    let yaml = r#"
alerts:
  - id: 30
    type: alarm
    category: technical
    support: { acknowledge: true }
    system: { system: 2, subsystem: 3, description: "Bilge level", location: "Aft" }
    threshold: { method: greater, level: 100 }
  - id: 10
    type: caution
    category: navigational
    threshold: { method: lower, level: 5 }
    occurrence_threshold: 3
"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    let mut manager = AlertManager::from_config(&config).unwrap();
    assert_eq!(manager.len(), 2);

    assert_eq!(manager.test_threshold(10, 1).unwrap(), ThresholdStatus::Normal);
    assert_eq!(manager.test_threshold(10, 1).unwrap(), ThresholdStatus::Normal);
    assert_eq!(manager.test_threshold(10, 1).unwrap(), ThresholdStatus::Exceeded);

    manager.test_threshold(30, 150).unwrap();
    let ack = AlertResponse {
        header: manager.get(30).unwrap().header(),
        acknowledge_network_id: 7,
        command: ResponseCommand::Acknowledge,
    };
    assert!(manager.handle_message(&ack.encode()));
    manager.test_threshold(30, 150).unwrap();
    assert_eq!(manager.get(30).unwrap().state(), AlertState::Acknowledged);

    let ids: Vec<u16> = manager
        .texts()
        .iter()
        .map(|msg| AlertText::decode(msg).unwrap().header.alert_id)
        .collect();
    assert_eq!(ids, vec![10, 30]);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(AlertError::Io(_))));
}

#[test]
fn test_decode_any_alert_pgn() {
    let clock = ManualClock::new();
    let alert = coolant_alert(&clock);
    for msg in [
        alert.encode_notification(),
        alert.encode_text(),
        respond(&alert, ResponseCommand::Acknowledge),
    ] {
        let decoded = AlertMessage::decode(&msg).unwrap();
        assert_eq!(decoded.header(), &alert.header());
        assert_eq!(decoded.encode().data(), msg.data());
    }
}

#[test]
fn test_short_acknowledge_is_applied() {
    let clock = ManualClock::new();
    let mut alert = coolant_alert(&clock);
    alert.test_threshold(70);

    // command byte cut off: it reads as not available, so the response is
    // accepted without changing the alert
    let full = respond(&alert, ResponseCommand::Acknowledge);
    let short = N2kMessage::from_payload(PGN_ALERT_RESPONSE, 2, &full.data()[..24]);
    assert!(alert.apply_response(&short));
    assert!(!alert.is_acknowledged());

    let decoded = AlertResponse::decode(&short).unwrap();
    assert_eq!(decoded.header, alert.header());
    assert_eq!(decoded.acknowledge_network_id, 0xCAFE);
}

#[test]
fn test_text_without_location_decodes() {
    let clock = ManualClock::new();
    let alert = coolant_alert(&clock);

    let mut msg = N2kMessage::new(PGN_ALERT_TEXT, 2);
    for byte in &alert.encode_text().data()[..17] {
        msg.add_byte(*byte);
    }
    msg.add_var_str("Coolant temperature high");

    let decoded = AlertText::decode(&msg).unwrap();
    assert_eq!(decoded.header, alert.header());
    assert_eq!(decoded.description, "Coolant temperature high");
    assert!(decoded.location.is_empty());
}

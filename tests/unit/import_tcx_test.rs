//! Unit tests for TCX activity traversal

use zonepace::activity::{collect_samples, locate_activity, ActivityError, Document, XmlNode};

const GARMIN_TCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase
  xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2"
  xmlns:ns3="http://www.garmin.com/xmlschemas/ActivityExtension/v2">
  <Activities>
    <Activity Sport="Running">
      <Id>2024-03-02T07:15:00.000Z</Id>
      <Lap StartTime="2024-03-02T07:15:00.000Z">
        <TotalTimeSeconds>300.0</TotalTimeSeconds>
        <Track>
          <Trackpoint>
            <Time>2024-03-02T07:15:00.000Z</Time>
            <HeartRateBpm>
              <Value>98</Value>
            </HeartRateBpm>
            <Extensions>
              <ns3:TPX>
                <ns3:Speed>2.45</ns3:Speed>
                <ns3:RunCadence>84</ns3:RunCadence>
              </ns3:TPX>
            </Extensions>
          </Trackpoint>
          <Trackpoint>
            <Time>2024-03-02T07:15:05.000Z</Time>
            <HeartRateBpm>
              <Value>131</Value>
            </HeartRateBpm>
            <Extensions>
              <ns3:TPX>
                <ns3:Speed>3.1</ns3:Speed>
                <ns3:RunCadence>86</ns3:RunCadence>
              </ns3:TPX>
            </Extensions>
          </Trackpoint>
        </Track>
      </Lap>
      <Lap StartTime="2024-03-02T07:20:00.000Z">
        <Track>
          <Trackpoint>
            <Time>2024-03-02T07:20:00.000Z</Time>
            <HeartRateBpm>
              <Value>155</Value>
            </HeartRateBpm>
          </Trackpoint>
        </Track>
      </Lap>
    </Activity>
  </Activities>
</TrainingCenterDatabase>"#;

#[test]
fn test_parse_garmin_export() {
    let doc = Document::parse(GARMIN_TCX).unwrap();
    let activity = locate_activity(doc.root()).unwrap();
    assert_eq!(activity.attribute("Sport"), Some("Running"));

    let samples = collect_samples(activity).unwrap();
    let heart_rates: Vec<Option<u16>> = samples.iter().map(|s| s.heart_rate).collect();
    assert_eq!(heart_rates, vec![Some(98), Some(131), Some(155)]);

    assert_eq!(samples[0].speed_ms, Some(2.45));
    assert_eq!(samples[0].cadence, Some(84));
    assert_eq!(samples[1].cadence, Some(86));
    assert_eq!(samples[2].speed_ms, None);
    assert_eq!(samples[2].speed_or_zero(), 0.0);
}

#[test]
fn test_activity_without_laps_has_no_samples() {
    let doc = Document::parse(
        r#"<TrainingCenterDatabase><Activities><Activity Sport="Running"/></Activities></TrainingCenterDatabase>"#,
    )
    .unwrap();
    let activity = locate_activity(doc.root()).unwrap();
    assert!(collect_samples(activity).unwrap().is_empty());
}

#[test]
fn test_malformed_speed_fails_activity() {
    let doc = Document::parse(
        r#"<TrainingCenterDatabase><Activities><Activity Sport="Running"><Lap><Track>
<Trackpoint><Extensions><TPX><Speed>fast</Speed></TPX></Extensions></Trackpoint>
</Track></Lap></Activity></Activities></TrainingCenterDatabase>"#,
    )
    .unwrap();
    let activity = locate_activity(doc.root()).unwrap();

    let result = collect_samples(activity);
    assert!(matches!(
        result,
        Err(ActivityError::InvalidValue { ref field, .. }) if field == "Speed"
    ));
}

#[test]
fn test_first_activity_is_used() {
    let doc = Document::parse(
        r#"<TrainingCenterDatabase><Activities>
<Activity Sport="Biking"/><Activity Sport="Running"/>
</Activities></TrainingCenterDatabase>"#,
    )
    .unwrap();
    let activity = locate_activity(doc.root()).unwrap();
    assert_eq!(activity.attribute("Sport"), Some("Biking"));
}

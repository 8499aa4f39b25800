use scraper::Html;

use rscraping::constants::{GENDER_FEMALE, GENDER_MALE, RACE_CONVENTIONAL};
use rscraping::models::Datasource;
use rscraping::parsers::html::{ActHtmlParser, HtmlParser, RaceContext};

const RACE_PAGE: &str = r#"
<html><body>
<div id="col-a">
  <section>
    <div class="header">
      <h3>XXXIX. BANDERA PETRONOR (22-07-2023)</h3>
      <p><span>Puntuable</span></p>
    </div>
    <table class="race-details"><tbody><tr><td>SD ZIERBENA</td><td>Zierbena (Bizkaia)</td></tr></tbody></table>
    <div class="results">
      <table><tbody>
        <tr><td>1</td><td>ZIERBENA</td><td>05:01,12</td><td>10:15,20</td><td>20:30,45</td></tr>
        <tr><td>2</td><td>ORIO ARRAUN ELKARTEA</td><td>05:05,00</td><td>10:20,10</td><td>20:45,10</td></tr>
      </tbody></table>
      <table><tbody>
        <tr><td>1</td><td>HONDARRIBIA ARRAUN ELKARTEA</td><td>05:10,00</td><td>Descal</td><td>-</td></tr>
      </tbody></table>
    </div>
  </section>
</div>
</body></html>
"#;

const CALENDAR_PAGE: &str = r#"
<html><body>
<div id="col-a">
  <table class="races"><tbody>
    <tr><td><a href="ver.php?r=1301303104">XXXIX. BANDERA PETRONOR (22-07-2023)</a></td></tr>
    <tr><td><a href="ver.php?r=1301303105">ORIOKO XXXIII. ESTROPADAK (29-07-2023)</a></td></tr>
  </tbody></table>
</div>
</body></html>
"#;

fn parse_fixture(page: &str, race_id: &str, is_female: bool) -> Option<rscraping::Race> {
    let document = Html::parse_document(page);
    ActHtmlParser
        .parse_race(&RaceContext { document: &document, results: None, race_id, is_female })
        .unwrap()
}

#[test]
fn test_parse_race_details() {
    let race = parse_fixture(RACE_PAGE, "1301303104", false).unwrap();

    assert_eq!(race.name, "XXXIX. BANDERA PETRONOR (22-07-2023)");
    assert_eq!(race.date, "22/07/2023");
    assert_eq!(race.day, 1);
    assert_eq!(race.datasource, Datasource::Act.to_string());
    assert_eq!(race.gender.as_deref(), Some(GENDER_MALE));
    assert_eq!(race.league.as_deref(), Some("EUSKO LABEL LIGA"));
    assert_eq!(race.town.as_deref(), Some("ZIERBENA"));
    assert_eq!(race.organizer.as_deref(), Some("SD ZIERBENA"));
    assert_eq!(race.sponsor.as_deref(), Some("PETRONOR"));
    assert!(!race.cancelled);

    assert_eq!(race.normalized_names.len(), 1);
    assert_eq!(race.normalized_names[0].name, "BANDERA PETRONOR");
    assert_eq!(race.normalized_names[0].edition, Some(39));
}

#[test]
fn test_parse_race_participants() {
    let race = parse_fixture(RACE_PAGE, "1301303104", false).unwrap();

    assert_eq!(race.participants.len(), 3);
    assert_eq!(race.race_type, RACE_CONVENTIONAL);
    assert_eq!(race.race_laps, Some(2));
    assert_eq!(race.race_lanes, Some(2));

    let zierbena = &race.participants[0];
    assert_eq!(zierbena.club_name, "ZIERBENA");
    assert_eq!(zierbena.lane, Some(1));
    assert_eq!(zierbena.series, Some(1));
    // the trailing total column is not a lap
    assert_eq!(zierbena.laps, vec!["05:01.120000".to_string(), "10:15.200000".to_string()]);
    assert_eq!(zierbena.distance, Some(5556));
    assert!(!zierbena.disqualified);

    let orio = &race.participants[1];
    assert_eq!(orio.participant, "ORIO");

    // "Descal" in the final crono marks a disqualification
    let hondarribia = &race.participants[2];
    assert_eq!(hondarribia.participant, "HONDARRIBIA");
    assert_eq!(hondarribia.series, Some(2));
    assert!(hondarribia.disqualified);
}

#[test]
fn test_female_race_normalization() {
    let page = RACE_PAGE.replace("XXXIX. BANDERA PETRONOR", "II. G.P. FANDICOSTA (J2)");
    let race = parse_fixture(&page, "1647864823", true).unwrap();

    assert_eq!(race.gender.as_deref(), Some(GENDER_FEMALE));
    assert_eq!(race.league.as_deref(), Some("LIGA EUSKOTREN"));
    assert_eq!(race.day, 2);
    for participant in &race.participants {
        assert_eq!(participant.distance, Some(2778));
    }

    // same raw title, different canonical name per gender
    assert_eq!(race.normalized_names[0].name, "GRAN PREMIO FANDICOSTA FEMININO");
    assert_eq!(race.normalized_names[0].edition, Some(2));

    let male = parse_fixture(&page, "1647864823", false).unwrap();
    assert_eq!(male.normalized_names[0].name, "GRAN PREMIO FANDICOSTA");
}

#[test]
fn test_hardcoded_editions() {
    let page = RACE_PAGE.replace("XXXIX. BANDERA PETRONOR", "BANDERA AYUNTAMIENTO DE ASTILLERO");
    let race = parse_fixture(&page, "1301303200", false).unwrap();
    assert_eq!(race.normalized_names[0].name, "BANDERA AYUNTAMIENTO DE ASTILLERO");
    assert_eq!(race.normalized_names[0].edition, Some(53));

    let page = RACE_PAGE.replace("XXXIX. BANDERA PETRONOR", "EL CORREO IKURRIÑA");
    let race = parse_fixture(&page, "1301303201", false).unwrap();
    assert_eq!(race.normalized_names[0].name, "EL CORREO IKURRIÑA");
    assert_eq!(race.normalized_names[0].edition, Some(37));
}

#[test]
fn test_missing_name_yields_no_race() {
    let page = RACE_PAGE.replace("<h3>XXXIX. BANDERA PETRONOR (22-07-2023)</h3>", "<h3></h3>");
    assert!(parse_fixture(&page, "1301303104", false).is_none());
}

#[test]
fn test_cancelled_races_are_flagged() {
    let page = RACE_PAGE.replace("<span>Puntuable</span>", "<span>No puntuable</span>");
    let race = parse_fixture(&page, "1301303104", false).unwrap();
    assert!(race.cancelled);
}

#[test]
fn test_parse_race_ids() {
    let document = Html::parse_document(CALENDAR_PAGE);
    assert_eq!(
        ActHtmlParser.parse_race_ids(&document),
        vec!["1301303104".to_string(), "1301303105".to_string()]
    );
}

#[test]
fn test_parse_race_names() {
    let document = Html::parse_document(CALENDAR_PAGE);
    let names = ActHtmlParser.parse_race_names(&document);

    assert_eq!(names.len(), 2);
    assert_eq!(names[0].race_id, "1301303104");
    assert_eq!(names[0].name, "XXXIX. BANDERA PETRONOR (22-07-2023)");
}

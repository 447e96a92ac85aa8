use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_TEXT: &str = "\
E.ON Polska S.A.
Faktura VAT nr 229250916302 z dnia 01.12.2025
Rozliczenie w okresie od 01.11.2025 do 30.11.2025
Sprzedaż energii elektrycznej
Energia czynna 300 0,4500 135,00 23 31,05 166,05
Razem
Należność za faktyczne zużycie 135,00 23 31,05 166,05
Zużycie: 300 kWh
";

#[test]
fn parse_plain_text_from_stdin() {
    Command::cargo_bin("taniprad")
        .unwrap()
        .args(["parse", "-", "--text"])
        .write_stdin(SAMPLE_TEXT)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"numer_faktury\":\"229250916302\""))
        .stdout(predicate::str::contains("\"sprzedawca\":\"eon\""));
}

#[test]
fn analyze_reports_the_savings_breakdown() {
    Command::cargo_bin("taniprad")
        .unwrap()
        .args(["analyze", "-", "--text"])
        .write_stdin(SAMPLE_TEXT)
        .assert()
        .success()
        .stdout(predicate::str::contains("filar1_vat"))
        .stdout(predicate::str::contains("filar4_oplaty"));
}

#[test]
fn json_document_input() {
    let payload = serde_json::json!({
        "full_text": SAMPLE_TEXT,
        "tables": [],
    });

    Command::cargo_bin("taniprad")
        .unwrap()
        .args(["parse", "-"])
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"typ_dokumentu\":\"settlement_invoice\""));
}

#[test]
fn malformed_json_fails_with_context() {
    Command::cargo_bin("taniprad")
        .unwrap()
        .args(["parse", "-"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode document JSON"));
}

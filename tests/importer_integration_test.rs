// ==========================================
// ProductImporter integration tests
// ==========================================
// File on disk -> SQLite store, end to end
// ==========================================


use product_import::importer::{ImportError, DB_INSERT_FAILED};
use product_import::logging;
use product_import::repository::{ProductRepository, ProductRepositoryImpl};
use test_helpers::{create_test_db, create_test_importer, csv_with_rows, write_source};

#[test]
fn test_import_reference_file() {
    logging::init_test();

    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&[
            r#"P0001,TV,"32"" Tv",10,399.99,"#,
            "P0002,Cd Player,Nice CD player,11,50.12,yes",
            "P0003,VCR,Top notch VCR,5,4.50,",
        ]),
    )
    .unwrap();

    let importer = create_test_importer(&db_path).unwrap();
    let report = importer.import(&source, false).unwrap();

    assert_eq!(report.total_processed(), 3);
    assert_eq!(report.successful(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.skipped_items()[0].code, "P0003");
    assert_eq!(report.skipped_items()[0].detail, "Cost < $5 and Stock < 10");

    let repo = importer.repository();
    let tv = repo.find_by_code("P0001").unwrap().unwrap();
    assert_eq!(tv.description, "32\" Tv");
    assert_eq!(tv.price, "399.99");
    assert!(tv.discontinued_at.is_none());
    assert!(repo.find_by_code("P0002").unwrap().unwrap().discontinued_at.is_some());
    assert!(repo.find_by_code("P0003").unwrap().is_none());
}

#[test]
fn test_second_run_reports_database_duplicates() {
    logging::init_test();

    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&["P0001,TV,Telly,10,399.99,"]),
    )
    .unwrap();

    let first = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();
    assert_eq!(first.successful(), 1);

    let second = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();
    assert_eq!(second.successful(), 0);
    assert_eq!(second.skipped_items()[0].detail, "Duplicate product code in database");

    // dry run ignores persisted state
    let dry = create_test_importer(&db_path).unwrap().import(&source, true).unwrap();
    assert_eq!(dry.successful(), 1);
    assert!(dry.is_dry_run());
}

#[test]
fn test_dry_run_writes_nothing() {
    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&["P0001,TV,Telly,10,399.99,", "P0002,Radio,Wireless,20,25.00,"]),
    )
    .unwrap();

    let importer = create_test_importer(&db_path).unwrap();
    let report = importer.import(&source, true).unwrap();

    assert_eq!(report.successful(), 2);
    assert_eq!(importer.repository().count_products().unwrap(), 0);
}

#[test]
fn test_code_repeated_three_times() {
    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&[
            "P0010,Lamp,Desk lamp,20,15.00,",
            "P0010,Lamp,Desk lamp,20,15.00,",
            "P0010,Lamp v2,Desk lamp,30,16.00,",
        ]),
    )
    .unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.successful(), 1);
    assert_eq!(report.skipped(), 2);
    assert!(report
        .skipped_items()
        .iter()
        .all(|e| e.detail == "Duplicate product code in CSV"));
    assert!(report.is_consistent());
}

#[test]
fn test_currency_symbols_and_thousands_separators() {
    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&[
            r#"P0020,Sofa,Three seater,12,"£1,000.00","#,
            r#"P0021,Piano,Grand,2,"$1,234.56","#,
            "P0022,Kettle,Steel,40,€19.99,",
        ]),
    )
    .unwrap();

    let importer = create_test_importer(&db_path).unwrap();
    let report = importer.import(&source, false).unwrap();

    // exactly 1000 is not "Cost > $1000"
    assert_eq!(report.successful(), 2);
    assert_eq!(report.skipped_items()[0].code, "P0021");
    assert_eq!(report.skipped_items()[0].detail, "Cost > $1000");

    let repo = importer.repository();
    assert_eq!(repo.find_by_code("P0020").unwrap().unwrap().price, "1000.00");
    assert_eq!(repo.find_by_code("P0022").unwrap().unwrap().price, "19.99");
}

#[test]
fn test_invalid_rows_fail_without_stopping_the_run() {
    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&[
            "P0030,,No name,10,10.00,",
            ",Nameless,No code,10,10.00,",
            "P0031,Chair,Oak,-2,abc,",
            "P0032,Table,Oak,10,120.00,",
        ]),
    )
    .unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.total_processed(), 4);
    assert_eq!(report.failed(), 3);
    assert_eq!(report.successful(), 1);

    let failed = report.failed_items();
    assert_eq!(failed[0].code, "P0030");
    assert!(failed[0].detail.contains("Product Name is required"));
    assert_eq!(failed[1].code, "Line 2");
    assert_eq!(
        failed[2].detail,
        "Stock must be a non-negative integer, Cost in GBP must be a valid positive number"
    );
}

#[test]
fn test_bom_blank_lines_and_ragged_rows() {
    let (dir, db_path) = create_test_db().unwrap();
    let content = format!(
        "\u{feff}{}\n\nP0040,Mug,Ceramic,50,6.00\n,,,,,\nP0041,Plate,Ceramic,50,8.00,no,extra,cells\n",
        test_helpers::HEADER
    );
    let source = write_source(&dir, "stock.csv", &content).unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.total_processed(), 2);
    assert_eq!(report.successful(), 2);
    assert_eq!(report.successful_items()[0].code, "P0040");
}

#[test]
fn test_empty_line_between_rows_counts_toward_line_number() {
    let (dir, db_path) = create_test_db().unwrap();
    let content = format!(
        "{}\nP0042,Bowl,Ceramic,50,6.00,\n\n,Mug,Ceramic,50,6.00,\n",
        test_helpers::HEADER
    );
    let source = write_source(&dir, "stock.csv", &content).unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.successful(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failed_items()[0].code, "Line 3");
}

#[test]
fn test_blank_lines_before_header_are_not_counted() {
    let (dir, db_path) = create_test_db().unwrap();
    let content = format!("\n\n{}\n,Mug,Ceramic,50,6.00,\n", test_helpers::HEADER);
    let source = write_source(&dir, "stock.csv", &content).unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.failed_items()[0].code, "Line 1");
}

#[test]
fn test_whitespace_only_row_fails_validation() {
    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&["P0043,Cup,Ceramic,50,6.00,", "  ,  "]),
    )
    .unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.total_processed(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failed_items()[0].code, "Line 2");
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_is_permission_denied() {
    use std::fs::{self, File, Permissions};
    use std::os::unix::fs::PermissionsExt;

    let (dir, db_path) = create_test_db().unwrap();
    let importer = create_test_importer(&db_path).unwrap();
    let source = write_source(&dir, "stock.csv", &csv_with_rows(&["P0044,Jug,Glass,50,6.00,"])).unwrap();

    fs::set_permissions(&source, Permissions::from_mode(0o000)).unwrap();
    // root ignores mode bits
    let readable = File::open(&source).is_ok();
    let result = importer.import(&source, false).map(|_| ());
    fs::set_permissions(&source, Permissions::from_mode(0o644)).unwrap();

    if !readable {
        assert!(matches!(result, Err(ImportError::PermissionDenied(_))));
        assert_eq!(importer.repository().count_products().unwrap(), 0);
    }
}

#[test]
fn test_missing_source_is_fatal() {
    let (dir, db_path) = create_test_db().unwrap();
    let importer = create_test_importer(&db_path).unwrap();

    let result = importer.import(dir.path().join("absent.csv"), false);
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    assert_eq!(importer.repository().count_products().unwrap(), 0);
}

#[test]
fn test_unsupported_and_corrupt_sources_are_fatal() {
    let (dir, db_path) = create_test_db().unwrap();
    let importer = create_test_importer(&db_path).unwrap();

    let pdf = write_source(&dir, "stock.pdf", "%PDF").unwrap();
    assert!(matches!(
        importer.import(&pdf, false),
        Err(ImportError::UnsupportedFormat(_))
    ));

    let xlsx = write_source(&dir, "stock.xlsx", "not a zip archive").unwrap();
    assert!(matches!(
        importer.import(&xlsx, false),
        Err(ImportError::ExcelParseError(_))
    ));
}

#[test]
fn test_overlong_code_fails_at_write() {
    let (dir, db_path) = create_test_db().unwrap();
    let source = write_source(
        &dir,
        "stock.csv",
        &csv_with_rows(&["P000000000099,Lamp,Desk lamp,20,15.00,", "P0050,Lamp,Desk lamp,20,15.00,"]),
    )
    .unwrap();

    let report = create_test_importer(&db_path).unwrap().import(&source, false).unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.failed_items()[0].detail, DB_INSERT_FAILED);
    assert_eq!(report.successful(), 1);

    let repo = ProductRepositoryImpl::new(&db_path).unwrap();
    assert_eq!(repo.count_products().unwrap(), 1);
}

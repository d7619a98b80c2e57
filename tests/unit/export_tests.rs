use super::batch_tests::run_batch;
use ig_stats::presentation::serialization::Serializer;
use ig_stats::presentation::tabular::{
    write_workbook, Workbook, ACCOUNTS_FILE, ACCOUNT_PIVOT_FILE, POSTS_FILE, POST_PIVOT_FILE,
};
use mockito::Server;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_json_export_round_trip() {
    let mut server = Server::new_async().await;
    let (records, _) = run_batch(&mut server).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resultados.json");

    Serializer::save_batch(&records, &path).unwrap();
    let loaded = Serializer::load_batch(&path).unwrap();

    assert_eq!(loaded, records);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"Sí\""));
    assert!(text.contains("Demasiadas peticiones"));
}

#[tokio::test]
async fn test_csv_export() {
    let mut server = Server::new_async().await;
    let (records, _) = run_batch(&mut server).await;
    let dir = tempfile::tempdir().unwrap();

    let paths = write_workbook(&records, dir.path()).unwrap();
    assert_eq!(
        paths,
        vec![
            dir.path().join(ACCOUNTS_FILE),
            dir.path().join(POSTS_FILE),
            dir.path().join(ACCOUNT_PIVOT_FILE),
            dir.path().join(POST_PIVOT_FILE),
        ]
    );

    let mut reader = csv::Reader::from_path(dir.path().join(POSTS_FILE)).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| &row[0] == "natgeo"));

    let workbook = Workbook::from_records(&records);
    let usernames: Vec<&str> = workbook
        .account_pivot
        .iter()
        .map(|row| row.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["ghost404", "limited", "natgeo"]);
    assert_eq!(workbook.account_pivot[1].followers, 50.0);
    assert_eq!(workbook.account_pivot[2].engagement_rate, 1.2);
    assert_eq!(workbook.post_pivot.len(), 2);
    assert_eq!(workbook.post_pivot[0].kind, "Foto");
    assert_eq!(workbook.post_pivot[0].likes, 10.0);
}

//! Ingestion Module Tests
//!
//! Validates CSV parsing, the skip/strict policies and result rendering.

#[cfg(test)]
mod tests {
    use crate::ingestion::loader::{CsvRecord, load_file, load_reader, parse_line};
    use crate::ingestion::printer::print_employees;
    use crate::ingestion::types::{LoadError, LoadOptions};
    use crate::query::{create_caches, employees_of};
    use crate::record::{Organization, Person};
    use crate::registry::CacheRegistry;
    use std::io::{Cursor, Write};

    // ============================================================
    // LINE PARSING
    // ============================================================

    #[test]
    fn test_parse_person_line() {
        let person: Person = parse_line("10,Alice,1", 1).unwrap();
        assert_eq!(person, Person::new(10, "Alice", 1));
    }

    #[test]
    fn test_parse_trims_whitespace_and_carriage_return() {
        let org: Organization = parse_line(" 2 , Acme\r", 1).unwrap();
        assert_eq!(org, Organization::new(2, "Acme"));
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let result = parse_line::<Person>("10,Alice", 4);

        assert!(matches!(
            result,
            Err(LoadError::FieldCount {
                line: 4,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_parse_non_integer_id() {
        let result = parse_line::<Organization>("one,Microsoft", 2);

        match result {
            Err(LoadError::InvalidInteger { line, field, value }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "id");
                assert_eq!(value, "one");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_fields_with_too_few_fields_is_field_count_error() {
        let result = Person::from_fields(&["10"], 7);

        assert!(matches!(
            result,
            Err(LoadError::FieldCount {
                line: 7,
                expected: 3,
                found: 1
            })
        ));
        assert!(Organization::from_fields(&[], 1).is_err());
    }

    #[test]
    fn test_parse_blank_line_is_field_count_error() {
        let result = parse_line::<Organization>("", 3);

        assert!(matches!(
            result,
            Err(LoadError::FieldCount { line: 3, found: 0, .. })
        ));
    }

    // ============================================================
    // LOADING POLICIES
    // ============================================================

    #[test]
    fn test_load_skips_bad_lines_by_default() {
        let registry = CacheRegistry::new();
        let (_, persons) = create_caches(&registry).unwrap();
        let input = Cursor::new("10,Alice,1\nbroken\n\n11,Bob,x\n12,Carl,1\n");

        let report = load_reader(input, "employees", &persons, LoadOptions::default()).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().all(LoadError::is_line_error));
        assert_eq!(persons.len(), 2);
    }

    #[test]
    fn test_strict_load_stops_at_first_bad_line() {
        let registry = CacheRegistry::new();
        let (_, persons) = create_caches(&registry).unwrap();
        let input = Cursor::new("10,Alice,1\nbroken\n12,Carl,1\n");
        let options = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };

        let result = load_reader(input, "employees", &persons, options);

        assert!(matches!(result, Err(LoadError::FieldCount { line: 2, .. })));
        assert_eq!(persons.len(), 1, "lines before the failure stay loaded");
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let registry = CacheRegistry::new();
        let (_, persons) = create_caches(&registry).unwrap();
        let input = Cursor::new(&b"10,Alice,1\n11,B\xFFb,2\n12,Carl,1\n"[..]);

        let report = load_reader(input, "employees", &persons, LoadOptions::default()).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0], LoadError::InvalidUtf8 { line: 2 }));
        assert_eq!(persons.len(), 2);
    }

    #[test]
    fn test_strict_load_stops_at_invalid_utf8() {
        let registry = CacheRegistry::new();
        let (_, persons) = create_caches(&registry).unwrap();
        let input = Cursor::new(&b"10,Alice,1\n11,B\xFFb,2\n12,Carl,1\n"[..]);
        let options = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };

        let result = load_reader(input, "employees", &persons, options);

        assert!(matches!(result, Err(LoadError::InvalidUtf8 { line: 2 })));
        assert_eq!(persons.len(), 1);
    }

    #[test]
    fn test_load_handles_crlf_and_padding() {
        let registry = CacheRegistry::new();
        let (orgs, _) = create_caches(&registry).unwrap();
        let input = Cursor::new("1, Microsoft\r\n\r\n 2 ,Acme \r\n");

        let report = load_reader(input, "companies", &orgs, LoadOptions::default()).unwrap();

        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(orgs.get(2_i64).unwrap(), Some(Organization::new(2, "Acme")));
    }

    #[test]
    fn test_load_files_then_query() {
        // ARRANGE: write both input files
        let dir = tempfile::tempdir().unwrap();
        let companies = dir.path().join("companies.txt");
        let employees = dir.path().join("employees.txt");
        std::fs::File::create(&companies)
            .unwrap()
            .write_all(b"1,Microsoft\n2,Acme\n")
            .unwrap();
        std::fs::File::create(&employees)
            .unwrap()
            .write_all(b"10,Alice,1\n11,Bob,2\n12,Carl,1\n")
            .unwrap();
        let registry = CacheRegistry::new();
        let (orgs, persons) = create_caches(&registry).unwrap();

        // ACT
        load_file(&companies, &orgs, LoadOptions::default()).unwrap();
        load_file(&employees, &persons, LoadOptions::default()).unwrap();
        let mut names = employees_of(&registry, "Microsoft", false).unwrap();

        // ASSERT
        names.sort();
        assert_eq!(names, vec!["Alice".to_string(), "Carl".to_string()]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let registry = CacheRegistry::new();
        let (orgs, _) = create_caches(&registry).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let result = load_file(&dir.path().join("absent.txt"), &orgs, LoadOptions::default());

        assert!(matches!(result, Err(LoadError::Io { .. })));
        assert!(orgs.is_empty());
    }

    // ============================================================
    // PRINTER
    // ============================================================

    #[test]
    fn test_print_employees() {
        let mut out = Vec::new();

        print_employees(&mut out, &["Alice".to_string(), "Carl".to_string()]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Person name=Alice\nPerson name=Carl\n"
        );
    }
}

#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use marquee::language::Config;
    use marquee::parsing;

    fn template_files(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "{:?} directory missing", dir);

        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("mq")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .mq files found in {:?}", dir);
        files.sort();
        files
    }

    #[test]
    fn ensure_samples_parse() {
        let config = Config::default();
        let files = template_files(Path::new("tests/samples/"));

        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            match parsing::parse_line(&config, &content) {
                Ok(_) => {}
                Err(e) => {
                    println!("File {:?} failed to parse: {}", file, e);
                    failures.push(file.clone());
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse successfully, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let config = Config::default();
        let files = template_files(Path::new("tests/broken/"));

        let mut unexpected_successes = Vec::new();

        for file in &files {
            let content = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            if parsing::parse_line(&config, &content).is_ok() {
                println!("File {:?} unexpectedly parsed successfully", file);
                unexpected_successes.push(file.clone());
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should not parse successfully, but {} files passed",
                unexpected_successes.len()
            );
        }
    }

    #[test]
    fn missing_file() {
        let filename = Path::new("tests/samples/nonexistent.mq");
        let error = parsing::load(filename).unwrap_err();
        assert_eq!(error.problem, "File not found");
        assert_eq!(
            error.to_string(),
            "tests/samples/nonexistent.mq: File not found"
        );
    }
}

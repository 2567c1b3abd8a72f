#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use marquee::formatting::*;
    use marquee::language::Config;
    use marquee::parsing;

    fn sample_files() -> Vec<PathBuf> {
        let dir = Path::new("tests/samples/");
        assert!(dir.exists(), "samples directory missing");

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .expect("Failed to read samples directory")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .path()
            })
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    == Some("mq")
            })
            .collect();

        assert!(!files.is_empty(), "No .mq files found in samples directory");
        files.sort();
        files
    }

    /// Formatting each sample and parsing the result must give back the
    /// same tokens, and formatting that again must change nothing.
    #[test]
    fn samples_survive_formatting() {
        let config = Config::default();
        let mut failures = Vec::new();

        for file in &sample_files() {
            let content = parsing::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let original = parsing::parse_line(&config, &content)
                .unwrap_or_else(|e| panic!("Failed to parse file {:?}: {}", file, e));

            let formatted = render(&Identity, &config, &original);

            let reparsed = match parsing::parse_line(&config, &formatted) {
                Ok(tokens) => tokens,
                Err(e) => {
                    println!("Formatted {:?} failed to parse: {}\n{}", file, e, formatted);
                    failures.push(file.clone());
                    continue;
                }
            };

            if reparsed != original {
                println!("Formatted {:?} parsed differently:\n{}", file, formatted);
                failures.push(file.clone());
                continue;
            }

            let again = render(&Identity, &config, &reparsed);
            if again != formatted {
                println!("Formatting {:?} is not stable", file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "Samples should survive formatting, but {} files did not",
                failures.len()
            );
        }
    }
}

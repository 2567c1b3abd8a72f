#[cfg(test)]
mod verify {
    use marquee::formatting::*;
    use marquee::language::Config;
    use marquee::parsing::parser::parse_via_scanning;

    /// Parse and then re-render with no markup.
    fn reformat(config: &Config, content: &str) -> String {
        let tokens = parse_via_scanning(config, content).expect("Failed to parse");
        render(&Identity, config, &tokens)
    }

    #[test]
    fn canonical_directives() {
        let config = Config::default();

        assert_eq!(reformat(&config, "${  if   ready  }"), "${if ready}\n");
        assert_eq!(
            reformat(&config, "${forall ( a ,b )<-pairs}"),
            "${forall (a, b) <- pairs}\n"
        );
        assert_eq!(
            reformat(&config, "${of Person { name , age=Just n , .. } }"),
            "${of Person{name, age = Just n, ..}}\n"
        );
        assert_eq!(
            reformat(&config, "${case x}${of Data.Maybe.Just (Pair a b)}${endcase}"),
            "${case x}\n${of Data.Maybe.Just (Pair a b)}\n${endcase}\n"
        );
        assert_eq!(
            reformat(&config, "${else}${elseif y}${endif}${endforall}"),
            "${else}\n${elseif y}\n${endif}\n${endforall}\n"
        );
    }

    #[test]
    fn text_and_interpolations() {
        let config = Config::default();

        assert_eq!(
            reformat(&config, "Hello, #{ user.name }!\n"),
            "Hello, #{user.name}!\n"
        );
        assert_eq!(
            reformat(&config, "Total: #{sum   (map price items)}"),
            "Total: #{sum (map price items)}"
        );
    }

    #[test]
    fn triggers_are_escaped() {
        let config = Config::default();

        // lone triggers come back escaped, which parses the same
        assert_eq!(reformat(&config, "costs $5"), "costs $\\5");
        assert_eq!(reformat(&config, "#\\{literal}"), "#\\{literal}");

        let config = Config::new('%', '@');
        assert_eq!(
            reformat(&config, "100% of $5 @\\home"),
            "100%\\ of $5 @\\home"
        );
    }

    #[test]
    fn newlines_survive_reformatting() {
        let config = Config::default();

        let content = "${if x}\n\nbody\n${endif}";
        let once = reformat(&config, content);
        assert_eq!(once, "${if x}\n\nbody\n${endif}\n");

        let original = parse_via_scanning(&config, content).unwrap();
        let again = parse_via_scanning(&config, &once).unwrap();
        assert_eq!(original, again);
    }

    #[test]
    fn terminal_markup() {
        let config = Config::default();
        let tokens = parse_via_scanning(&config, "${if ready}").unwrap();

        let result = render(&Terminal, &config, &tokens);
        assert!(result.contains("\u{1b}["));
        assert!(result.contains("ready"));
        assert!(result.ends_with('\n'));
    }
}

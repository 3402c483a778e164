use cityfinder_core::normalize::normalize;

#[test]
fn it_folds_and_lowercases() {
    assert_eq!(normalize("Bāgmatī Zone"), vec!["bagmati", "zone"]);
    assert_eq!(normalize("Kværndrup"), vec!["kvaerndrup"]);
    assert_eq!(normalize("CONSOLAÇÃO"), vec!["consolacao"]);
}

#[test]
fn it_treats_every_separator_alike() {
    let expected = vec!["zavety", "il", "icha"];
    assert_eq!(normalize("Zavety Il'icha"), expected);
    assert_eq!(normalize("Zavety Il’icha"), expected);
    assert_eq!(normalize("Zavety Il icha"), expected);
    assert_eq!(normalize("Zavety\u{a0}Il-icha"), expected);
}

#[test]
fn it_drops_stop_words_but_keeps_order() {
    assert_eq!(normalize("Republic of India"), vec!["republic", "india"]);
    assert_eq!(normalize("Isle of Wight, GB"), vec!["isle", "wight", "gb"]);
}

#[test]
fn degenerate_inputs_normalize_to_nothing() {
    assert_eq!(normalize(""), Vec::<String>::new());
    assert_eq!(normalize("*"), Vec::<String>::new());
    assert_eq!(normalize("   \t  "), Vec::<String>::new());
    assert_eq!(normalize("the and of"), Vec::<String>::new());
}

#[test]
fn normalizing_normalized_output_is_a_no_op() {
    for input in [
        "Hurzuf UA",
        "Zavety Il’icha RU",
        "Bāgmatī Zone NP",
        "Republic of India IN",
        "Kværndrup DK",
    ] {
        let once = normalize(input);
        let twice = normalize(&once.join(" "));
        assert_eq!(once, twice, "normalize must be idempotent for {input:?}");
    }
}

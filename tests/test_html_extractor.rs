use rezept_scraper::{extract, RecipeParser, Vocabulary};

#[test]
fn test_microdata_selectors_take_priority() {
    let html = r#"
    <html>
    <body>
        <nav><h1>Kochblog</h1></nav>
        <div itemscope itemtype="https://schema.org/Recipe">
            <h2 itemprop="name">Zürcher Geschnetzeltes</h2>
            <p itemprop="description">Der Klassiker mit Rösti.</p>
            <meta itemprop="prepTime" content="PT20M">
            <time itemprop="cookTime" datetime="PT1H15M"></time>
            <span class="portionen">4 Personen</span>
            <span itemprop="recipeIngredient">600 g Kalbfleisch</span>
            <span itemprop="recipeIngredient">2 dl Rahm</span>
            <ul class="zutaten"><li>Nicht verwenden</li></ul>
        </div>
    </body>
    </html>
    "#;

    let recipe = extract(html);

    assert_eq!(recipe.title, "Zürcher Geschnetzeltes");
    assert_eq!(recipe.description, "Der Klassiker mit Rösti.");
    assert_eq!(recipe.prep_time, "20 Min");
    assert_eq!(recipe.cook_time, "1 Std 15 Min");
    assert_eq!(recipe.servings, "4 Personen");
    assert_eq!(recipe.ingredients, vec!["600 g Kalbfleisch", "2 dl Rahm"]);
}

#[test]
fn test_heuristics_find_unlabelled_lists() {
    let html = r#"
    <html>
    <body>
        <h1>Kartoffelgratin</h1>
        <article>
            <ul>
                <li>Rezept drucken</li>
                <li>Teilen</li>
            </ul>
            <ul>
                <li>1 kg Kartoffeln</li>
                <li>3 dl Rahm</li>
                <li>Salz</li>
                <li>Muskat</li>
            </ul>
            <ol>
                <li>Den Backofen auf 200 Grad vorheizen.</li>
                <li>Die Kartoffeln in Scheiben schneiden und würzen.</li>
                <li>Im Ofen etwa 45 Minuten backen lassen.</li>
            </ol>
        </article>
    </body>
    </html>
    "#;

    let recipe = extract(html);

    assert_eq!(recipe.title, "Kartoffelgratin");
    assert_eq!(recipe.ingredients, vec!["1 kg Kartoffeln", "3 dl Rahm", "Salz"]);
    assert_eq!(recipe.instructions.len(), 3);
    assert_eq!(recipe.instructions[0], "Den Backofen auf 200 Grad vorheizen.");
}

#[test]
fn test_numbered_paragraphs_as_instructions() {
    let html = r#"
    <div class="recipe">
        <h2>Fotzelschnitten</h2>
        <p>Ein einfaches Resteessen.</p>
        <p>1. Brot in Milch tauchen.</p>
        <p>2. In Ei wenden.</p>
        <p>3. Ausbacken.</p>
    </div>
    "#;

    let recipe = extract(html);

    assert_eq!(
        recipe.instructions,
        vec!["1. Brot in Milch tauchen.", "2. In Ei wenden.", "3. Ausbacken."]
    );
}

#[test]
fn test_custom_vocabulary() {
    let vocabulary = Vocabulary {
        ingredient_keywords: vec!["sel".to_string(), "poivre".to_string()],
        min_ingredient_items: 2,
        ..Vocabulary::default()
    };
    let parser = RecipeParser::new(vocabulary, Default::default());
    let html = "<ul><li>Sel</li><li>Poivre noir</li><li>Bonne humeur</li></ul>";

    let recipe = parser.extract(html);

    assert_eq!(recipe.ingredients, vec!["Sel", "Poivre noir"]);
}

#[test]
fn test_rendering_heuristic_result() {
    let html = r#"
    <h1>Linsensuppe</h1>
    <ul><li>200 g Linsen</li><li>1 Zwiebel</li><li>1 l Gemüsebouillon</li></ul>
    "#;

    let document = RecipeParser::default().parse(html, "https://example.com/linsen");

    assert!(document.contains("## Linsensuppe"));
    assert!(document.contains("- 200 g Linsen\n- 1 Zwiebel\n- 1 l Gemüsebouillon"));
    assert!(!document.contains("Zubereitung"));
    assert!(document.contains("`vegetarisch`"));
}

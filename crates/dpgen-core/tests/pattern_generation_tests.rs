/*!
# Pattern Generation Integration Tests

End-to-end generation through the file emitter: declaration sets per
pattern, file layout, idempotence, configuration loading and failure
handling.
*/

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use dpgen_core::{
    ConfigError, DeclKind, FileEmitter, GenerationOutcome, Generator, GeneratorError,
    MemoryEmitter, NamingConfig, PatternEngine, PatternKind, PatternRequest,
};
use tempfile::TempDir;

fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn file_generator(root: &Path) -> Generator<FileEmitter> {
    Generator::new(NamingConfig::default(), FileEmitter::new().root(root))
}

/// Relative paths of every file under `root`, sorted
fn files_under(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

fn shape(kind: PatternKind, class_name: &str) -> Vec<(String, DeclKind)> {
    let request = PatternRequest::new(kind, class_name)
        .with_product_type("Animal")
        .with_product_name("Dog")
        .with_package("com.zoo");
    PatternEngine::default()
        .synthesize(&request)
        .unwrap()
        .into_iter()
        .map(|d| (d.name, d.kind))
        .collect()
}

fn owned(expected: &[(&str, DeclKind)]) -> Vec<(String, DeclKind)> {
    expected.iter().map(|(n, k)| (n.to_string(), *k)).collect()
}

#[test]
fn test_declaration_sets_per_pattern() {
    use DeclKind::*;

    assert_eq!(
        shape(PatternKind::AbstractFactory, "DogFactory"),
        owned(&[
            ("Animal", Interface),
            ("Dog", Class),
            ("AbstractFactory", Interface),
            ("DogFactory", Class),
        ])
    );
    assert_eq!(
        shape(PatternKind::Builder, "Zoo"),
        owned(&[
            ("Zoo", Class),
            ("Builder", Interface),
            ("Builder1", Class),
            ("Animal", Interface),
            ("Dog", Class),
        ])
    );
    assert_eq!(
        shape(PatternKind::FactoryMethod, "DogCreator"),
        owned(&[
            ("Animal", Interface),
            ("Dog", Class),
            ("Creator", AbstractClass),
            ("DogCreator", Class),
        ])
    );
    assert_eq!(
        shape(PatternKind::Facade, "Shop"),
        owned(&[("AbstractFacade", AbstractClass), ("Shop", Class)])
    );
    assert_eq!(
        shape(PatternKind::ChainOfResponsibility, "Handler"),
        owned(&[
            ("Handler", AbstractClass),
            ("Receiver1", Class),
            ("Receiver2", Class),
            ("Receiver3", Class),
        ])
    );
    assert_eq!(
        shape(PatternKind::Mediator, "ChatRoom"),
        owned(&[
            ("Mediator", AbstractClass),
            ("ChatRoom", Class),
            ("Colleague", AbstractClass),
            ("Colleague1", Class),
            ("Colleague2", Class),
        ])
    );
    assert_eq!(
        shape(PatternKind::Visitor, "PrintVisitor"),
        owned(&[
            ("Element", AbstractClass),
            ("Element1", Class),
            ("Element2", Class),
            ("Visitor", AbstractClass),
            ("PrintVisitor", Class),
        ])
    );
    assert_eq!(
        shape(PatternKind::TemplateMethod, "Report"),
        owned(&[("AbstractClass", AbstractClass), ("Report", Class)])
    );
}

#[test]
fn test_abstract_factory_writes_package_layout() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut generator = file_generator(temp_dir.path());

    let outcome = generator.generate_code(
        "AFDP",
        &args(&[
            ("className", "DogFactory"),
            ("productType", "Animal"),
            ("productName", "Dog"),
            ("packageName", "com.example.zoo"),
        ]),
    )?;
    let report = outcome.report().unwrap();
    assert!(report.success());

    assert_eq!(
        files_under(temp_dir.path()),
        vec![
            PathBuf::from("com/example/zoo/AbstractFactory.java"),
            PathBuf::from("com/example/zoo/Animal.java"),
            PathBuf::from("com/example/zoo/Dog.java"),
            PathBuf::from("com/example/zoo/DogFactory.java"),
        ]
    );

    let factory = fs::read_to_string(temp_dir.path().join("com/example/zoo/DogFactory.java"))?;
    assert!(factory.contains("public class DogFactory implements AbstractFactory {"));
    assert!(factory.contains("  @Override\n  public Animal createAnimal() {\n    return new Dog();\n  }"));
    Ok(())
}

#[test]
fn test_generation_is_idempotent() -> anyhow::Result<()> {
    for kind in PatternKind::ALL {
        let request = PatternRequest::new(kind, "Main")
            .with_product_type("Part")
            .with_product_name("Wheel")
            .with_package("com.idem");

        let first_dir = TempDir::new()?;
        let second_dir = TempDir::new()?;
        file_generator(first_dir.path()).generate(&request)?;
        let mut generator = file_generator(second_dir.path());
        generator.generate(&request)?;
        // A second run into the same tree overwrites with identical content
        generator.generate(&request)?;

        let files = files_under(first_dir.path());
        assert_eq!(files, files_under(second_dir.path()), "{kind}");
        for file in files {
            assert_eq!(
                fs::read(first_dir.path().join(&file))?,
                fs::read(second_dir.path().join(&file))?,
                "{kind}: {}",
                file.display()
            );
        }
    }
    Ok(())
}

#[test]
fn test_chain_receiver_count_follows_config() -> anyhow::Result<()> {
    let mut names = NamingConfig::default();
    names.chain.number_of_class = 4;
    let mut generator = Generator::new(names, MemoryEmitter::new());

    let request = PatternRequest::new(PatternKind::ChainOfResponsibility, "Approver")
        .with_package("com.chain");
    let report = generator.generate(&request)?;
    assert_eq!(
        report.declarations,
        vec!["Approver", "Receiver1", "Receiver2", "Receiver3", "Receiver4"]
    );

    let files = generator.emitter();
    for i in 1..4 {
        let source = files.get(format!("com/chain/Receiver{i}.java")).unwrap();
        assert!(source.contains(&format!("public Receiver{i}(Approver successor) {{")));
        assert!(source.contains("super.handleRequest();"));
    }
    let last = files.get("com/chain/Receiver4.java").unwrap();
    assert!(!last.contains("successor"));
    assert!(last.contains("// Must handle the request unconditionally"));
    Ok(())
}

#[test]
fn test_visitor_methods_match_elements() -> anyhow::Result<()> {
    let mut names = NamingConfig::default();
    names.visitor.number_of_visitor_methods = 3;
    let engine = PatternEngine::new(names);

    let request = PatternRequest::new(PatternKind::Visitor, "PrintVisitor").with_package("v");
    let declarations = engine.synthesize(&request)?;

    let visitor = declarations.iter().find(|d| d.name == "Visitor").unwrap();
    let abstract_names: Vec<_> = visitor.abstract_methods().map(|m| m.name.clone()).collect();
    assert_eq!(abstract_names, vec!["visitElement1", "visitElement2", "visitElement3"]);

    let concrete = declarations.iter().find(|d| d.name == "PrintVisitor").unwrap();
    let overridden: Vec<_> = concrete
        .methods
        .iter()
        .filter(|m| m.overrides)
        .map(|m| m.name.clone())
        .collect();
    assert_eq!(overridden, abstract_names);
    assert!(dpgen_core::decl::unresolved_references(&declarations).is_empty());
    Ok(())
}

#[test]
fn test_mediator_set_state_guards_notification() -> anyhow::Result<()> {
    let mut generator = Generator::new(NamingConfig::default(), MemoryEmitter::new());
    let request = PatternRequest::new(PatternKind::Mediator, "ChatRoom").with_package("chat");
    generator.generate(&request)?;

    for i in 1..=2 {
        let source = generator
            .emitter()
            .get(format!("chat/Colleague{i}.java"))
            .unwrap();
        let guard = source.find("if (!Objects.equals(this.state, state)) {").unwrap();
        let notify = source.find("mediator.mediate(this);").unwrap();
        assert!(guard < notify);
        assert!(source.contains("import java.util.Objects;"));
    }
    Ok(())
}

#[test]
fn test_unknown_code_generates_nothing() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut generator = file_generator(temp_dir.path());

    let outcome = generator.generate_code(
        "ZZZ",
        &args(&[("className", "Anything"), ("packageName", "com.zzz")]),
    )?;
    assert!(matches!(outcome, GenerationOutcome::Skipped { ref code } if code == "ZZZ"));
    assert!(files_under(temp_dir.path()).is_empty());
    Ok(())
}

#[test]
fn test_missing_package_writes_no_files() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut generator = file_generator(temp_dir.path());

    let err = generator
        .generate_code(
            "BDP",
            &args(&[
                ("className", "Zoo"),
                ("productType", "Animal"),
                ("productName", "Dog"),
            ]),
        )
        .unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidRequest { pattern: PatternKind::Builder, .. }));
    assert!(files_under(temp_dir.path()).is_empty());
    Ok(())
}

#[test]
fn test_write_failure_continues_with_remaining_declarations() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    // A directory where Dog.java should go makes that one write fail
    fs::create_dir_all(temp_dir.path().join("com/zoo/Dog.java"))?;

    let mut generator = file_generator(temp_dir.path());
    let request = PatternRequest::new(PatternKind::FactoryMethod, "DogCreator")
        .with_product_type("Animal")
        .with_product_name("Dog")
        .with_package("com.zoo");
    let report = generator.generate(&request)?;

    assert!(report.is_partial());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].declaration, "Dog");
    assert_eq!(report.written.len(), 3);
    assert!(temp_dir.path().join("com/zoo/Creator.java").is_file());
    assert!(temp_dir.path().join("com/zoo/DogCreator.java").is_file());
    Ok(())
}

#[test]
fn test_shipped_naming_file_matches_defaults() -> anyhow::Result<()> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("naming.yaml");
    let loaded = NamingConfig::load(&path)?;
    assert_eq!(loaded, NamingConfig::default());
    Ok(())
}

#[test]
fn test_config_file_missing_key_fails_to_load() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let shipped = fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("naming.yaml"))?;
    let broken = shipped.replace("  successorField: successor\n", "");
    let path = temp_dir.path().join("naming.yaml");
    fs::write(&path, broken)?;

    let err = NamingConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("successorField"));
    Ok(())
}

#[test]
fn test_custom_names_flow_into_sources() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let yaml = fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("naming.yaml"))?
        .replace("abstractClassName: AbstractFacade", "abstractClassName: StoreFront")
        .replace("  operationMethod: operation\n\nChain", "  operationMethod: checkout\n\nChain");
    let path = temp_dir.path().join("naming.yaml");
    fs::write(&path, yaml)?;
    let names = NamingConfig::load(&path)?;

    let mut generator = Generator::new(names, MemoryEmitter::new());
    let report = generator.generate(&PatternRequest::new(PatternKind::Facade, "Shop").with_package("shop"))?;
    assert_eq!(report.declarations, vec!["StoreFront", "Shop"]);

    let shop = generator.emitter().get("shop/Shop.java").unwrap();
    assert!(shop.contains("public class Shop extends StoreFront {"));
    assert!(shop.contains("public void checkout() {"));
    Ok(())
}

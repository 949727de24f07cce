use crate::schema::{Family, Variant};
use phf::phf_map;

static IMPORTS: phf::Map<&'static str, &'static str> = phf_map! {
    "List" => "java.util.List",
};

/// Turns one family into the full line sequence of its Java artifact:
/// import preamble, base class opening, nested `Visitor` interface, one
/// nested static class per variant, the abstract `accept` declaration,
/// and the closing brace. Pure; the caller decides where the lines go.
pub fn generate(family: &Family) -> Vec<String> {
    let mut lines = Vec::new();

    let imports = referenced_imports(family);
    for import in imports.iter() {
        lines.push(format!("import {};", import));
    }
    if !imports.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!("abstract class {} {{", family.base_name));
    define_visitor(&mut lines, family);
    for variant in family.variants.iter() {
        define_type(&mut lines, family, variant);
    }

    lines.push(String::new());
    lines.push("  abstract <R> R accept(Visitor<R> visitor);".to_string());
    lines.push("}".to_string());

    lines
}

fn define_visitor(lines: &mut Vec<String>, family: &Family) {
    lines.push("  interface Visitor<R> {".to_string());
    for variant in family.variants.iter() {
        lines.push(format!(
            "    R visit{}{}({} {});",
            variant.name,
            family.base_name,
            variant.name,
            family.base_name.to_lowercase(),
        ));
    }
    lines.push("  }".to_string());
}

fn define_type(lines: &mut Vec<String>, family: &Family, variant: &Variant) {
    lines.push(String::new());
    lines.push(format!(
        "  static class {} extends {} {{",
        variant.name, family.base_name,
    ));

    for field in variant.fields.iter() {
        lines.push(format!("    final {} {};", field.type_name, field.name));
    }

    // Constructor: parameters mirror the field list, assignments are
    // straight `this.name = name`.
    lines.push(String::new());
    let params = variant
        .fields
        .iter()
        .map(|f| format!("{} {}", f.type_name, f.name))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("    {}({}) {{", variant.name, params));
    for field in variant.fields.iter() {
        lines.push(format!("      this.{} = {};", field.name, field.name));
    }
    lines.push("    }".to_string());

    lines.push(String::new());
    lines.push("    @Override".to_string());
    lines.push("    <R> R accept(Visitor<R> visitor) {".to_string());
    lines.push(format!(
        "      return visitor.visit{}{}(this);",
        variant.name, family.base_name,
    ));
    lines.push("    }".to_string());

    lines.push("  }".to_string());
}

fn referenced_imports(family: &Family) -> Vec<&'static str> {
    let mut imports = Vec::new();
    for variant in family.variants.iter() {
        for field in variant.fields.iter() {
            let head = field.type_name.split('<').next().unwrap_or("");
            if let Some(&path) = IMPORTS.get(head) {
                if !imports.contains(&path) {
                    imports.push(path);
                }
            }
        }
    }
    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Family;

    fn expr_family() -> Family {
        Family::parse(
            "Expr",
            &[
                "Binary : Expr left, Token operator, Expr right",
                "Literal : Object value",
            ],
        )
        .unwrap()
    }

    fn position_of(lines: &[String], wanted: &str) -> usize {
        lines
            .iter()
            .position(|l| l == wanted)
            .unwrap_or_else(|| panic!("missing line: {}", wanted))
    }

    #[test]
    fn visitor_has_one_operation_per_variant_in_entry_order() {
        let lines = generate(&expr_family());
        let binary = position_of(&lines, "    R visitBinaryExpr(Binary expr);");
        let literal = position_of(&lines, "    R visitLiteralExpr(Literal expr);");
        assert!(binary < literal);
        assert_eq!(2, lines.iter().filter(|l| l.contains(" R visit")).count());
    }

    #[test]
    fn node_fields_and_constructor_mirror_the_entry() {
        let lines = generate(&expr_family());
        let class = position_of(&lines, "  static class Binary extends Expr {");
        assert_eq!("    final Expr left;", lines[class + 1]);
        assert_eq!("    final Token operator;", lines[class + 2]);
        assert_eq!("    final Expr right;", lines[class + 3]);

        let ctor = position_of(&lines, "    Binary(Expr left, Token operator, Expr right) {");
        assert_eq!("      this.left = left;", lines[ctor + 1]);
        assert_eq!("      this.operator = operator;", lines[ctor + 2]);
        assert_eq!("      this.right = right;", lines[ctor + 3]);
        assert_eq!("    }", lines[ctor + 4]);
    }

    #[test]
    fn each_class_dispatches_to_its_own_visitor_operation() {
        let lines = generate(&expr_family());
        let binary_class = position_of(&lines, "  static class Binary extends Expr {");
        let literal_class = position_of(&lines, "  static class Literal extends Expr {");
        let binary_dispatch = position_of(&lines, "      return visitor.visitBinaryExpr(this);");
        let literal_dispatch = position_of(&lines, "      return visitor.visitLiteralExpr(this);");
        assert!(binary_class < binary_dispatch && binary_dispatch < literal_class);
        assert!(literal_class < literal_dispatch);
    }

    #[test]
    fn statement_family_uses_its_own_base_name() {
        let family = Family::parse("Stmt", &["Print : Expr expression"]).unwrap();
        let lines = generate(&family);
        assert_eq!(1, lines.iter().filter(|l| l.contains(" R visit")).count());
        position_of(&lines, "    R visitPrintStmt(Print stmt);");
        position_of(&lines, "      return visitor.visitPrintStmt(this);");
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(&expr_family()), generate(&expr_family()));
    }

    // A family with no variants still gets its base wrapper and an empty
    // visitor interface.
    #[test]
    fn generates_base_wrapper_for_empty_family() {
        let family = Family::parse("Expr", &[]).unwrap();
        let expected: Vec<String> = [
            "abstract class Expr {",
            "  interface Visitor<R> {",
            "  }",
            "",
            "  abstract <R> R accept(Visitor<R> visitor);",
            "}",
        ]
        .iter()
        .map(|l| l.to_string())
        .collect();
        assert_eq!(expected, generate(&family));
    }

    #[test]
    fn container_types_pull_in_their_import() {
        let family = Family::parse("Stmt", &["Block : List<Stmt> statements"]).unwrap();
        let lines = generate(&family);
        assert_eq!("import java.util.List;", lines[0]);
        assert_eq!("", lines[1]);
        assert_eq!("abstract class Stmt {", lines[2]);
    }

    #[test]
    fn imports_are_deduplicated() {
        let family = Family::parse(
            "Stmt",
            &[
                "Block : List<Stmt> statements",
                "Function : Token name, List<Token> params, List<Stmt> body",
            ],
        )
        .unwrap();
        let lines = generate(&family);
        assert_eq!(1, lines.iter().filter(|l| l.starts_with("import ")).count());
    }

    #[test]
    fn families_without_container_types_have_no_preamble() {
        let family = Family::parse("Expr", &["Literal : Object value"]).unwrap();
        assert_eq!("abstract class Expr {", generate(&family)[0]);
    }
}

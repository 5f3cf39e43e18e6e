use anyhow::Result;
use field_mask::{
    MaskDiagnostic, MaskEngine, MaskError, MaskKind, MaskTarget, MemoryField, MemoryForm,
    ResolveMode,
};
use std::cell::RefCell;
use std::rc::Rc;

fn signup_form() -> MemoryForm {
    let mut form = MemoryForm::new();
    form.add_field(MemoryField::with_id("cpf", ""));
    form.add_field(MemoryField::with_id("doc", ""));
    form.add_field(MemoryField::with_id("tel", ""));
    form.add_field(MemoryField::with_name("cep", ""));
    form.add_field(MemoryField::with_name("birth", ""));
    form
}

#[test]
fn test_typing_formats_after_every_keystroke() -> Result<()> {
    let form = signup_form();
    MaskEngine::create(&form, "#cpf", ResolveMode::Strict)?
        .document_id()
        .add_event("input")?;

    let field = form.field("#cpf").unwrap();
    field.type_text("1234");
    assert_eq!(field.value(), "123.4");

    field.type_text("5678901");
    assert_eq!(field.value(), "123.456.789-01");

    // extra keystrokes past the canonical shape are dropped
    field.type_text("23");
    assert_eq!(field.value(), "123.456.789-01");
    Ok(())
}

#[test]
fn test_dual_mask_switches_while_typing() -> Result<()> {
    let form = signup_form();
    let diagnostics = Rc::new(RefCell::new(Vec::new()));
    let sink = diagnostics.clone();

    let binding = MaskEngine::create(&form, "#doc", ResolveMode::Strict)?
        .document_or_company_id()
        .on_diagnostic(move |d| sink.borrow_mut().push(d.clone()))
        .add_event("input")?;
    assert!(binding.is_attached());
    assert_eq!(binding.kind, MaskKind::DocumentOrCompanyId);

    let field = form.field("#doc").unwrap();
    field.type_text("12345678901");
    assert_eq!(field.value(), "123.456.789-01");
    assert!(diagnostics.borrow().is_empty());

    field.type_text("234");
    assert_eq!(field.value(), "12.345.678/9012-34");
    assert!(matches!(
        diagnostics.borrow().last(),
        Some(MaskDiagnostic::DualModeOverflow { .. })
    ));
    Ok(())
}

#[test]
fn test_phone_grows_from_fixed_line_to_mobile() -> Result<()> {
    let form = signup_form();
    MaskEngine::create(&form, "#tel", ResolveMode::Strict)?
        .phone()
        .add_event("input")?;

    let field = form.field("#tel").unwrap();
    field.type_text("1199998888");
    assert_eq!(field.value(), "(11)9999-8888");

    field.type_text("7");
    assert_eq!(field.value(), "(11)99998-8887");
    Ok(())
}

#[test]
fn test_change_event_formats_on_commit_only() -> Result<()> {
    let form = signup_form();
    MaskEngine::create(&form, "[name=cep]", ResolveMode::Strict)?
        .postal_code()
        .add_event("change")?;

    let field = form.field("cep").unwrap();
    field.type_text("12345678");
    assert_eq!(field.value(), "12345678");

    field.commit(&field.value());
    assert_eq!(field.value(), "12.345-678");

    field.commit("12.345-678");
    assert_eq!(field.value(), "12.345-678");
    Ok(())
}

#[test]
fn test_fields_are_masked_independently() -> Result<()> {
    let form = signup_form();
    MaskEngine::create(&form, "birth", ResolveMode::Strict)?
        .date_br()
        .add_event("input")?;
    MaskEngine::create(&form, "#cpf", ResolveMode::Strict)?
        .document_id()
        .add_event("input")?;

    let birth = form.field("birth").unwrap();
    let cpf = form.field("#cpf").unwrap();
    birth.type_text("01012024");
    cpf.type_text("12345678901");

    assert_eq!(birth.value(), "01/01/2024");
    assert_eq!(cpf.value(), "123.456.789-01");
    Ok(())
}

#[test]
fn test_binding_without_kind_registers_nothing() {
    let form = signup_form();
    let engine = MaskEngine::create(&form, "#cpf", ResolveMode::Strict).unwrap();

    let err = engine.add_event("input").unwrap_err();
    assert!(matches!(err, MaskError::Configuration { .. }));
    assert_eq!(form.field("#cpf").unwrap().listener_count("input"), 0);
}

#[test]
fn test_missing_field_strict_and_tolerant() -> Result<()> {
    let form = signup_form();

    let err = MaskEngine::create(&form, "#cnpj", ResolveMode::Strict).err();
    assert!(matches!(err, Some(MaskError::TargetNotFound { .. })));

    let binding = MaskEngine::create(&form, "#cnpj", ResolveMode::Tolerant)?
        .company_id()
        .add_event("input")?;
    assert!(!binding.is_attached());
    Ok(())
}

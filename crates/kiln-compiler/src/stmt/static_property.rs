//! Lowering of `Class::$property = expr` assignments.
//!
//! The target is resolved and access-checked first; only then does the
//! expression's type tag select the runtime call sequence that materializes
//! the value and stores it. A failure leaves the emitter untouched.

use kiln_core::{ClassHandle, CompilationError, CompiledExpression, ExprType, Span, VariableKind};

use crate::access::validate_static_property;
use crate::config::CodegenProperty;
use crate::context::CompilationContext;
use crate::emit::{Instruction, OBJECT_HEADER, StoreValue};
use crate::resolve::{ClassRef, resolve_class};

type Result<T> = std::result::Result<T, CompilationError>;

/// A validated static property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPropertyTarget {
    pub class: ClassHandle,
    pub property: String,
}

/// Compile `class_ref::$property = expr`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn assign(
    ctx: &mut CompilationContext<'_>,
    class_ref: ClassRef<'_>,
    property: &str,
    expr: &CompiledExpression,
    span: Span,
) -> Result<()> {
    let class = resolve_class(ctx, class_ref, property, span)?;
    validate_static_property(ctx, class, property, span)?;

    log::debug!(
        "lowering {}::${} = <{}> (inside loop: {})",
        class.name,
        property,
        expr.ty(),
        ctx.inside_cycle()
    );

    let target = StaticPropertyTarget {
        class: class.handle.clone(),
        property: property.to_string(),
    };
    ctx.emitter_mut().set_line(span.line);
    lower(ctx, &target, expr, span)
}

/// Emit the calls that store `expr` into `target`.
pub fn lower(
    ctx: &mut CompilationContext<'_>,
    target: &StaticPropertyTarget,
    expr: &CompiledExpression,
    span: Span,
) -> Result<()> {
    match expr.ty() {
        ExprType::Null => store(ctx, target, StoreValue::Null, None),

        ExprType::Int | ExprType::Uint | ExprType::Long => {
            let temp = non_tracked_temp(ctx)?;
            ctx.emitter_mut().output(Instruction::BoxLong {
                target: temp.clone(),
                value: expr.code().to_string(),
            });
            store(ctx, target, StoreValue::Variable(temp), None)
        }

        ExprType::String => {
            let temp = non_tracked_temp(ctx)?;
            ctx.emitter_mut().output(Instruction::CopyString {
                target: temp.clone(),
                literal: expr.code().to_string(),
            });
            store(ctx, target, StoreValue::Variable(temp), None)
        }

        ExprType::Bool => {
            let value = if expr.boolean_code() == "1" {
                StoreValue::True
            } else {
                StoreValue::False
            };
            store(ctx, target, value, None)
        }

        ExprType::EmptyArray => {
            let temp = non_tracked_temp(ctx)?;
            ctx.emitter_mut().output(Instruction::InitArray {
                target: temp.clone(),
            });
            store(ctx, target, StoreValue::Variable(temp), None)
        }

        ExprType::Variable => lower_variable(ctx, target, expr.code(), span),

        unsupported @ (ExprType::Ulong
        | ExprType::Char
        | ExprType::Uchar
        | ExprType::Double
        | ExprType::Istring
        | ExprType::Array) => Err(CompilationError::UnsupportedExpressionType {
            type_name: unsupported.name().to_string(),
            span,
        }),
    }
}

/// Store the value of a named variable, dispatching on its storage kind.
fn lower_variable(
    ctx: &mut CompilationContext<'_>,
    target: &StaticPropertyTarget,
    name: &str,
    span: Span,
) -> Result<()> {
    let id = ctx.symbols_mut().get_variable_for_read(name, span)?;
    let variable = ctx.symbols().variable(id)?;
    let (kind, source, temporal) = (
        variable.kind(),
        variable.name().to_string(),
        variable.is_temporal(),
    );

    match kind {
        VariableKind::Int
        | VariableKind::Uint
        | VariableKind::Long
        | VariableKind::Ulong
        | VariableKind::Char
        | VariableKind::Uchar => {
            let temp = non_tracked_temp(ctx)?;
            ctx.emitter_mut().output(Instruction::BoxLong {
                target: temp.clone(),
                value: source,
            });

            let cache = if ctx.inside_cycle()
                && ctx
                    .config()
                    .is_enabled(CodegenProperty::CacheStaticPropertiesInLoops)
            {
                Some(property_cache_slot(ctx)?)
            } else {
                None
            };
            store(ctx, target, StoreValue::Variable(temp), cache)
        }

        VariableKind::Bool => {
            let temp = non_tracked_temp(ctx)?;
            ctx.emitter_mut().output(Instruction::BoxBool {
                target: temp.clone(),
                value: source,
            });
            store(ctx, target, StoreValue::Variable(temp), None)
        }

        VariableKind::String | VariableKind::Variable => {
            store(ctx, target, StoreValue::Variable(source), None)?;
            // The store takes its own reference; the temporary is spent.
            if temporal {
                ctx.symbols_mut().set_idle(id, true)?;
            }
            Ok(())
        }

        unsupported @ (VariableKind::Double | VariableKind::Array | VariableKind::PropertyInfo) => {
            Err(CompilationError::UnsupportedExpressionType {
                type_name: unsupported.name().to_string(),
                span,
            })
        }
    }
}

/// Allocate a non-tracked value cell and emit its initialization.
fn non_tracked_temp(ctx: &mut CompilationContext<'_>) -> Result<String> {
    let id = ctx
        .symbols_mut()
        .get_temp_non_tracked_variable(VariableKind::Variable);
    let name = ctx.symbols().variable(id)?.name().to_string();
    ctx.emitter_mut().output(Instruction::InitNonReferenced {
        target: name.clone(),
    });
    Ok(name)
}

/// Allocate the slot a cached store remembers the resolved property in.
///
/// Declared with the empty sentinel and bound to this call site, so it is
/// never recycled.
fn property_cache_slot(ctx: &mut CompilationContext<'_>) -> Result<String> {
    let symbols = ctx.symbols_mut();
    let id = symbols.get_temp_variable_for_write(VariableKind::PropertyInfo);
    symbols.set_must_init_null(id, true)?;
    symbols.set_reusable(id, false)?;
    Ok(symbols.variable(id)?.name().to_string())
}

fn store(
    ctx: &mut CompilationContext<'_>,
    target: &StaticPropertyTarget,
    value: StoreValue,
    cache: Option<String>,
) -> Result<()> {
    ctx.headers_mut().add(OBJECT_HEADER);
    ctx.emitter_mut().output(Instruction::UpdateStaticProperty {
        class: target.class.clone(),
        property: target.property.clone(),
        value,
        cache,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_table::VarId;
    use crate::CodegenConfig;
    use kiln_core::{ClassId, Visibility};
    use kiln_registry::{ClassDecl, ClassRegistry};

    fn registry() -> (ClassRegistry, ClassId, ClassId) {
        let mut registry = ClassRegistry::new();
        let foo = registry
            .register_class(
                ClassDecl::user("Foo")
                    .static_property("count", Visibility::Public)
                    .static_property("secret", Visibility::Private)
                    .property("label", Visibility::Public),
            )
            .unwrap();
        let bar = registry
            .register_class(ClassDecl::user("Bar").extends("Foo"))
            .unwrap();
        (registry, foo, bar)
    }

    fn span() -> Span {
        Span::new(12, 5, 18)
    }

    fn instructions(ctx: &CompilationContext<'_>) -> Vec<Instruction> {
        ctx.emitter().instructions().cloned().collect()
    }

    fn store_of(value: StoreValue, cache: Option<&str>) -> Instruction {
        Instruction::UpdateStaticProperty {
            class: ClassHandle::new("foo_ce"),
            property: "count".into(),
            value,
            cache: cache.map(str::to_string),
        }
    }

    #[test]
    fn null_uses_shared_singleton() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::null(), span())
            .unwrap();

        assert_eq!(instructions(&ctx), vec![store_of(StoreValue::Null, None)]);
        assert_eq!(ctx.symbols().temp_count(), 0);
        assert!(ctx.headers().contains(OBJECT_HEADER));
        assert_eq!(ctx.emitter().lines()[0].line, 12);
    }

    #[test]
    fn integer_literal_is_boxed() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::int(5), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![
                Instruction::InitNonReferenced { target: "_0".into() },
                Instruction::BoxLong {
                    target: "_0".into(),
                    value: "5".into()
                },
                store_of(StoreValue::Variable("_0".into()), None),
            ]
        );
        assert_eq!(ctx.symbols().temp_count(), 1);
        assert!(!ctx.symbols().get(VarId(0)).unwrap().is_tracked());
    }

    #[test]
    fn uint_and_long_literals_are_boxed() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        for expr in [CompiledExpression::uint(7), CompiledExpression::long(-3)] {
            assign(&mut ctx, ClassRef::SelfClass, "count", &expr, span()).unwrap();
        }

        let boxed: Vec<&str> = ctx
            .emitter()
            .instructions()
            .filter_map(|i| match i {
                Instruction::BoxLong { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(boxed, vec!["7", "-3"]);
        assert_eq!(ctx.symbols().temp_count(), 2);
    }

    #[test]
    fn string_literal_is_copied() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        assign(
            &mut ctx,
            ClassRef::SelfClass,
            "count",
            &CompiledExpression::string("bar"),
            span(),
        )
        .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![
                Instruction::InitNonReferenced { target: "_0".into() },
                Instruction::CopyString {
                    target: "_0".into(),
                    literal: "bar".into()
                },
                store_of(StoreValue::Variable("_0".into()), None),
            ]
        );
    }

    #[test]
    fn bool_literal_uses_singletons() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::bool(true), span())
            .unwrap();
        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::bool(false), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![
                store_of(StoreValue::True, None),
                store_of(StoreValue::False, None)
            ]
        );
        assert_eq!(ctx.symbols().temp_count(), 0);
    }

    #[test]
    fn bool_falls_back_to_plain_code() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        let expr = CompiledExpression::new(ExprType::Bool, "1");
        assign(&mut ctx, ClassRef::SelfClass, "count", &expr, span()).unwrap();
        assert_eq!(instructions(&ctx), vec![store_of(StoreValue::True, None)]);
    }

    #[test]
    fn empty_array_is_initialized() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        assign(
            &mut ctx,
            ClassRef::SelfClass,
            "count",
            &CompiledExpression::empty_array(),
            span(),
        )
        .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![
                Instruction::InitNonReferenced { target: "_0".into() },
                Instruction::InitArray { target: "_0".into() },
                store_of(StoreValue::Variable("_0".into()), None),
            ]
        );
    }

    #[test]
    fn integer_variable_outside_loop() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        ctx.symbols_mut()
            .add_variable(VariableKind::Long, "n", Span::default())
            .unwrap();

        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("n"), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![
                Instruction::InitNonReferenced { target: "_0".into() },
                Instruction::BoxLong {
                    target: "_0".into(),
                    value: "n".into()
                },
                store_of(StoreValue::Variable("_0".into()), None),
            ]
        );
        assert_eq!(ctx.symbols().temp_count(), 1);
    }

    #[test]
    fn integer_variable_inside_loop_is_cached() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        ctx.symbols_mut()
            .add_variable(VariableKind::Char, "c", Span::default())
            .unwrap();

        ctx.enter_loop();
        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("c"), span())
            .unwrap();
        ctx.exit_loop();

        assert_eq!(
            instructions(&ctx)[2],
            store_of(StoreValue::Variable("_0".into()), Some("_1"))
        );

        let slot = ctx.symbols().get(VarId(2)).unwrap();
        assert_eq!(slot.name(), "_1");
        assert_eq!(slot.kind(), VariableKind::PropertyInfo);
        assert!(slot.must_init_null());
        assert!(!slot.is_reusable());
        assert_eq!(slot.declaration(), "zend_property_info *_1 = NULL;");
    }

    #[test]
    fn each_cached_store_gets_its_own_slot() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        ctx.symbols_mut()
            .add_variable(VariableKind::Int, "i", Span::default())
            .unwrap();
        ctx.enter_loop();

        for _ in 0..2 {
            assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("i"), span())
                .unwrap();
        }

        let caches: Vec<String> = ctx
            .emitter()
            .instructions()
            .filter_map(|i| match i {
                Instruction::UpdateStaticProperty { cache, .. } => cache.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(caches.len(), 2);
        assert_ne!(caches[0], caches[1]);
    }

    #[test]
    fn cache_can_be_disabled() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new().with(CodegenProperty::CacheStaticPropertiesInLoops, 0);
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        ctx.symbols_mut()
            .add_variable(VariableKind::Long, "n", Span::default())
            .unwrap();

        ctx.enter_loop();
        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("n"), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx)[2],
            store_of(StoreValue::Variable("_0".into()), None)
        );
        assert_eq!(ctx.symbols().temp_count(), 1);
    }

    #[test]
    fn bool_variable_is_boxed() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        ctx.symbols_mut()
            .add_variable(VariableKind::Bool, "flag", Span::default())
            .unwrap();
        ctx.enter_loop();

        assign(
            &mut ctx,
            ClassRef::SelfClass,
            "count",
            &CompiledExpression::variable("flag"),
            span(),
        )
        .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![
                Instruction::InitNonReferenced { target: "_0".into() },
                Instruction::BoxBool {
                    target: "_0".into(),
                    value: "flag".into()
                },
                store_of(StoreValue::Variable("_0".into()), None),
            ]
        );
    }

    #[test]
    fn value_variable_is_stored_directly() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        let id = ctx
            .symbols_mut()
            .add_variable(VariableKind::Variable, "v", Span::default())
            .unwrap();

        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("v"), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![store_of(StoreValue::Variable("v".into()), None)]
        );
        let v = ctx.symbols().get(id).unwrap();
        assert!(!v.is_idle());
        assert_eq!(v.uses(), 1);
    }

    #[test]
    fn temporal_source_becomes_idle() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        let temp = ctx
            .symbols_mut()
            .get_temp_variable_for_write(VariableKind::String);
        assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("_0"), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![store_of(StoreValue::Variable("_0".into()), None)]
        );
        assert!(ctx.symbols().get(temp).unwrap().is_idle());

        // The spent temporary is handed out again.
        let next = ctx
            .symbols_mut()
            .get_temp_variable_for_write(VariableKind::String);
        assert_eq!(next, temp);
    }

    #[test]
    fn unsupported_literal_type() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);

        let err = assign(
            &mut ctx,
            ClassRef::SelfClass,
            "count",
            &CompiledExpression::new(ExprType::Double, "1.5"),
            span(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            CompilationError::UnsupportedExpressionType {
                type_name: "double".into(),
                span: span(),
            }
        );
        assert!(ctx.emitter().is_empty());
        assert!(ctx.headers().is_empty());
    }

    #[test]
    fn unsupported_variable_kind() {
        let (registry, foo, _) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, foo);
        ctx.symbols_mut()
            .add_variable(VariableKind::Double, "d", Span::default())
            .unwrap();

        let err = assign(&mut ctx, ClassRef::SelfClass, "count", &CompiledExpression::variable("d"), span())
            .unwrap_err();

        assert!(matches!(
            err,
            CompilationError::UnsupportedExpressionType { ref type_name, .. } if type_name == "double"
        ));
        assert!(ctx.emitter().is_empty());
    }

    #[test]
    fn failed_access_emits_nothing() {
        let (registry, _, bar) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::for_class(&registry, &config, bar);

        let err = assign(&mut ctx, ClassRef::Parent, "secret", &CompiledExpression::int(1), span())
            .unwrap_err();
        assert!(matches!(err, CompilationError::PrivateAccessViolation { .. }));

        let err = assign(&mut ctx, ClassRef::Parent, "label", &CompiledExpression::int(1), span())
            .unwrap_err();
        assert!(matches!(err, CompilationError::NotStatic { .. }));

        assert!(ctx.emitter().is_empty());
        assert!(ctx.symbols().is_empty());
        assert!(ctx.headers().is_empty());
    }

    #[test]
    fn inherited_property_through_subclass() {
        let (registry, _, bar) = registry();
        let config = CodegenConfig::new();
        let mut ctx = CompilationContext::new(&registry, &config);

        assign(&mut ctx, ClassRef::Named("Bar"), "count", &CompiledExpression::null(), span())
            .unwrap();

        assert_eq!(
            instructions(&ctx),
            vec![Instruction::UpdateStaticProperty {
                class: registry.get(bar).unwrap().handle.clone(),
                property: "count".into(),
                value: StoreValue::Null,
                cache: None,
            }]
        );
    }
}

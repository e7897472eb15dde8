//! The demo command set served by the shell.

use command_graph_core::{
    CommandDeclaration, CommandSender, StaticSender, argument, literal, multi_literal,
};
use command_graph_dispatch::{GreedyStringParser, IntegerParser, WordParser};
use command_graph_registry::{CommandRegistry, RegistryConfig, RegistryError};

/// Builds the registry the shell dispatches against.
pub fn demo_registry() -> Result<CommandRegistry<StaticSender>, RegistryError> {
    let mut registry =
        CommandRegistry::with_config(RegistryConfig::new("shell", "the graph shell"));

    registry.register(
        CommandDeclaration::new("greet")
            .with_help(
                "Greet someone",
                "Prints a greeting for the session or a named target.",
            )
            .with_aliases(["hello"])
            .executes(|sender: &StaticSender, _| println!("Hello, {}!", sender.name()))
            .then(argument("who", WordParser).executes(|_, args| {
                if let Some(who) = args.get_str("who") {
                    println!("Hello, {who}!");
                }
            })),
    )?;

    registry.register(
        CommandDeclaration::new("math")
            .with_short_description("Integer arithmetic")
            .with_arguments([
                multi_literal(["add", "sub", "mul"]).named("op"),
                argument("a", IntegerParser::new()),
                argument("b", IntegerParser::new()),
            ])
            .executes(|_: &StaticSender, args| {
                let (Some(op), Some(a), Some(b)) = (
                    args.get_str("op"),
                    args.get_integer("a"),
                    args.get_integer("b"),
                ) else {
                    return;
                };
                let result = match op {
                    "add" => a.saturating_add(b),
                    "sub" => a.saturating_sub(b),
                    _ => a.saturating_mul(b),
                };
                println!("{a} {op} {b} = {result}");
            }),
    )?;

    registry.register(
        CommandDeclaration::new("echo")
            .with_short_description("Echo text back")
            .with_usage(["/echo <text...>"])
            .with_arguments([argument("text", GreedyStringParser)])
            .executes(|_: &StaticSender, args| {
                if let Some(text) = args.get_str("text") {
                    println!("{text}");
                }
            }),
    )?;

    registry.register(
        CommandDeclaration::new("admin")
            .with_help(
                "Administrative controls",
                "Operations restricted to sessions holding the admin permission.",
            )
            .with_permission("admin")
            .then(literal("shutdown").executes(|_: &StaticSender, _| println!("shutting down")))
            .then(
                literal("reload").then(
                    argument("module", WordParser)
                        .replace_suggestions(["world", "network", "scripts"])
                        .executes(|_: &StaticSender, args| {
                            if let Some(module) = args.get_str("module") {
                                println!("reloading {module}");
                            }
                        }),
                ),
            ),
    )?;

    Ok(registry)
}

//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, KindArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{render_tree, GroupKind, GroupNode, GroupRef, Selection};
use crate::application::services::{SearchContext, SearchParams};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load().map_err(crate::infrastructure::InfraError::Application)?;

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(command) => {
            let container = build_container(cli, settings)?;
            dispatch(command, &container)
        }
        None => Ok(()),
    }
}

fn build_container(cli: &Cli, settings: Settings) -> CliResult<ServiceContainer> {
    let store_path: PathBuf = cli
        .store
        .clone()
        .or_else(|| settings.store_path.clone())
        .ok_or_else(|| {
            CliError::Usage("no group store given (use --store or set store_path)".into())
        })?;
    debug!(store = %store_path.display(), "loading group store");
    Ok(ServiceContainer::new(settings, &store_path)?)
}

fn dispatch(command: &Commands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Tree { kind, select } => _tree(container, *kind, select),
        Commands::Render {
            kind,
            select,
            filter,
        } => _render(container, *kind, select, *filter),
        Commands::Section {
            name,
            kind,
            no_parents,
            no_siblings,
            html,
        } => _section(container, name, *kind, !no_parents, !no_siblings, *html),
        Commands::Parents { name, kind } => _parents(container, name, *kind),
        Commands::Longname {
            name,
            default,
            kind,
        } => _longname(container, name, default, *kind),
        Commands::AllowableParents { name, kind } => {
            _allowable_parents(container, name.as_deref(), *kind)
        }
        Commands::Search { query, fq, group } => _search(container, query, fq, group),
        Commands::Info => _info(container),
        // handled before the container is built
        Commands::Completion { .. } => Ok(()),
    }
}

fn effective_kind(container: &ServiceContainer, kind: Option<KindArg>) -> GroupKind {
    kind.map(GroupKind::from)
        .unwrap_or(container.settings.default_kind)
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, kind: Option<KindArg>, select: &[String]) -> CliResult<()> {
    let kind = effective_kind(container, kind);
    let selection: Selection = select.iter().map(String::as_str).collect();
    let forest = container.hierarchy.group_tree(kind, &selection)?;
    for node in &forest {
        print!("{}", to_termtree(node));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _render(
    container: &ServiceContainer,
    kind: Option<KindArg>,
    select: &[String],
    filter: bool,
) -> CliResult<()> {
    let kind = effective_kind(container, kind);
    let selection: Selection = select.iter().map(String::as_str).collect();
    let forest = if filter {
        container.hierarchy.group_tree(kind, &selection)?
    } else {
        let mut forest = container.hierarchy.group_tree(kind, &Selection::new())?;
        crate::domain::highlight_forest(&mut forest, &selection);
        forest
    };
    output::info(&render_tree(&forest, kind));
    Ok(())
}

#[instrument(skip(container))]
fn _section(
    container: &ServiceContainer,
    name: &str,
    kind: Option<KindArg>,
    include_parents: bool,
    include_siblings: bool,
    html: bool,
) -> CliResult<()> {
    let kind = effective_kind(container, kind);
    let section =
        container
            .hierarchy
            .group_tree_section(name, kind, include_parents, include_siblings)?;
    if html {
        output::info(&render_tree(std::slice::from_ref(&section), kind));
    } else {
        print!("{}", to_termtree(&section));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _parents(container: &ServiceContainer, name: &str, kind: Option<KindArg>) -> CliResult<()> {
    let kind = effective_kind(container, kind);
    for parent in container.hierarchy.group_tree_parents(name, kind)? {
        output::info(&format!("{}\t{}", parent.name, parent.title));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _longname(
    container: &ServiceContainer,
    name: &str,
    default: &str,
    kind: Option<KindArg>,
) -> CliResult<()> {
    let kind = effective_kind(container, kind);
    output::info(&container.hierarchy.longname(name, default, kind)?);
    Ok(())
}

#[instrument(skip(container))]
fn _allowable_parents(
    container: &ServiceContainer,
    name: Option<&str>,
    kind: Option<KindArg>,
) -> CliResult<()> {
    let kind = effective_kind(container, kind);
    for group in container.hierarchy.allowable_parent_groups(name, kind)? {
        output::info(&format!("{}\t{}", group.name, group.title));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _search(container: &ServiceContainer, query: &str, fq: &str, group: &str) -> CliResult<()> {
    let record = container
        .store
        .get(group, GroupKind::Organization)
        .ok_or_else(|| CliError::InvalidArgs(format!("unknown organization: {group}")))?;

    let mut context = SearchContext {
        group: Some(GroupRef {
            id: record.id,
            name: record.name,
        }),
        ..SearchContext::default()
    };
    let params = SearchParams {
        q: query.to_string(),
        fq: fq.to_string(),
    };

    let rewritten = container.search.before_search(Some(&mut context), params);
    output::info(&format!("q:  {}", rewritten.q));
    output::info(&format!("fq: {}", rewritten.fq));
    Ok(())
}

#[instrument(skip(container))]
fn _info(container: &ServiceContainer) -> CliResult<()> {
    output::header("orgtree");
    if let Some(path) = &container.settings.store_path {
        output::detail(&format!("store_path: {}", path.display()));
    }
    output::detail(&format!("default_kind: {}", container.settings.default_kind));
    for kind in [GroupKind::Organization, GroupKind::Group] {
        let records = container.store.records(kind);
        output::detail(&format!("{kind}s: {}", records.len()));
    }
    Ok(())
}

/// Convert a group node into a termtree for ASCII display; highlighted
/// nodes are starred.
fn to_termtree(node: &GroupNode) -> Tree<String> {
    let label = if node.highlighted {
        format!("{} ({}) *", node.title, node.name)
    } else {
        format!("{} ({})", node.title, node.name)
    };
    Tree::new(label).with_leaves(node.children.iter().map(to_termtree))
}

use tracing::{debug, info};

use crate::{
    ast::{Program, Statement},
    config::{InterpreterConfig, ReloadPolicy},
    engine::{self, AggregateRequest, QueryResult, SortRequest},
    error::{ExecError, StatementError},
    predicate::Condition,
    table::{CsvLoader, Table, TableLoader},
};

/// Query state accumulated by one interpreter.
///
/// Created empty; every statement but `print` mutates it, and `print` only
/// reads it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Option<Table>,
    conditions: Vec<Condition>,
    aggregations: Vec<AggregateRequest>,
    sort: Option<SortRequest>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Filter conditions, applied together as a conjunction.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn aggregations(&self) -> &[AggregateRequest] {
        &self.aggregations
    }

    pub fn sort(&self) -> Option<&SortRequest> {
        self.sort.as_ref()
    }

    /// Drop accumulated filters, aggregations and sort; keep the table.
    pub fn clear_query(&mut self) {
        self.conditions.clear();
        self.aggregations.clear();
        self.sort = None;
    }

    fn loaded_table(&self) -> Result<&Table, ExecError> {
        self.table.as_ref().ok_or(ExecError::NoTableLoaded)
    }

    /// Apply one statement. Returns the query result for `print`.
    ///
    /// On error the session is left as it was before the call.
    pub fn apply<L: TableLoader>(
        &mut self,
        statement: &Statement,
        loader: &L,
        config: &InterpreterConfig,
    ) -> Result<Option<QueryResult>, ExecError> {
        match statement {
            Statement::Load { path } => {
                let table = loader.load(path).map_err(|source| ExecError::Load {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path, rows = table.row_count(), "table loaded");

                if self.table.is_some() && config.reload == ReloadPolicy::Reset {
                    debug!("reload resets accumulated query");
                    self.clear_query();
                }
                self.table = Some(table);
                Ok(None)
            }
            Statement::Filter(expr) => {
                self.loaded_table()?;
                let conditions = config.filter_mode.combine(expr)?;
                debug!(added = conditions.len(), total = self.conditions.len() + conditions.len(), "filter");
                self.conditions.extend(conditions);
                Ok(None)
            }
            Statement::Aggregate { function, column } => {
                self.loaded_table()?;
                self.aggregations.push(AggregateRequest {
                    function: *function,
                    column: column.clone(),
                });
                Ok(None)
            }
            Statement::Sort { column, ascending } => {
                self.loaded_table()?;
                self.sort = Some(SortRequest {
                    column: column.clone(),
                    ascending: *ascending,
                });
                Ok(None)
            }
            Statement::Print => {
                let table = self.loaded_table()?;
                let result = engine::execute(
                    table,
                    &self.conditions,
                    self.sort.as_ref(),
                    &self.aggregations,
                    config,
                )?;
                debug!(rows = result.row_count, aggregates = result.aggregates.len(), "print");
                Ok(Some(result))
            }
        }
    }
}

/// Runs programs against a session that persists across calls.
///
/// Each interpreter owns its session; give every concurrent user their own.
#[derive(Debug)]
pub struct Interpreter<L = CsvLoader> {
    loader: L,
    config: InterpreterConfig,
    session: Session,
}

impl Interpreter<CsvLoader> {
    /// Interpreter reading CSV files relative to the working directory.
    pub fn new() -> Self {
        Self::with_loader(CsvLoader::new(), InterpreterConfig::default())
    }
}

impl Default for Interpreter<CsvLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TableLoader> Interpreter<L> {
    pub fn with_loader(loader: L, config: InterpreterConfig) -> Self {
        Interpreter {
            loader,
            config,
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Forget the loaded table and everything accumulated.
    pub fn reset(&mut self) {
        self.session = Session::new();
    }

    /// Run every statement in order and return the result of the last
    /// `print`, or `None` if the program has no `print`.
    ///
    /// Stops at the first failing statement. Statements before it keep
    /// their effect on the session.
    pub fn execute(&mut self, program: &Program) -> Result<Option<QueryResult>, StatementError> {
        self.execute_each(program, |_| {})
    }

    /// Like [`Interpreter::execute`], also handing each `print` result to
    /// `on_print` as it is produced.
    pub fn execute_each(
        &mut self,
        program: &Program,
        mut on_print: impl FnMut(&QueryResult),
    ) -> Result<Option<QueryResult>, StatementError> {
        let Interpreter {
            loader,
            config,
            session,
        } = self;

        let mut last = None;
        for (index, statement) in program.iter().enumerate() {
            debug!(index, statement = statement.keyword(), "visiting statement");

            let outcome = session
                .apply(statement, &*loader, config)
                .map_err(|source| StatementError {
                    index,
                    keyword: statement.keyword(),
                    source,
                })?;

            if let Some(result) = outcome {
                on_print(&result);
                last = Some(result);
            }
        }
        Ok(last)
    }
}

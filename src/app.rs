use std::{process::ExitCode, sync::Arc};

use anyhow::Result;

use crate::{
    cli::{Cli, ClientArgs, Command, ServerArgs},
    domain::{self, connection::EndpointAddress, flow::Flow},
    infra,
    net::{self, TcpChatClient, TcpChatServer},
    ui::{self, StdinLineSource, StdoutDisplay},
    usecases::{
        self, bootstrap, client_console::ClientConsole, context::AppContext,
        contracts::DisplaySink, server_console::ServerConsole, startup,
    },
};

pub fn run(cli: Cli) -> Result<ExitCode> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        net = net::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let exit_code = match cli.command {
        Command::Client(args) => run_client(&context, args),
        Command::Server(args) => run_server(&context, args),
    };

    tracing::info!(exit_code, "console finished");
    Ok(ExitCode::from(exit_code))
}

fn client_address(context: &AppContext, args: &ClientArgs) -> EndpointAddress {
    EndpointAddress::new(
        args.host
            .clone()
            .unwrap_or_else(|| context.config.client.host.clone()),
        args.port.unwrap_or(context.config.client.port),
    )
}

fn server_port(context: &AppContext, args: &ServerArgs) -> u16 {
    args.port.unwrap_or(context.config.server.port)
}

fn run_client(context: &AppContext, args: ClientArgs) -> u8 {
    let address = client_address(context, &args);
    tracing::info!(%address, login_from_args = args.login.is_some(), "starting client console");

    let display: Arc<dyn DisplaySink> = Arc::new(StdoutDisplay);
    let client = TcpChatClient::new(context.runtime.handle().clone(), address, Arc::clone(&display));
    let mut console = ClientConsole::new(client, Arc::clone(&display));
    let mut source = StdinLineSource::new();

    if let Flow::Shutdown { exit_code } = startup::start_client(
        &mut console,
        &mut source,
        display.as_ref(),
        args.login.as_deref(),
    ) {
        return exit_code;
    }

    ui::shell::run(&mut source, &mut console, display.as_ref())
}

fn run_server(context: &AppContext, args: ServerArgs) -> u8 {
    let port = server_port(context, &args);
    tracing::info!(port, "starting server console");

    let display: Arc<dyn DisplaySink> = Arc::new(StdoutDisplay);
    let mut server = TcpChatServer::new(context.runtime.handle().clone(), port, Arc::clone(&display));

    if let Flow::Shutdown { exit_code } = startup::start_server(&mut server, display.as_ref()) {
        return exit_code;
    }

    let mut console = ServerConsole::new(server, Arc::clone(&display));
    let mut source = StdinLineSource::new();
    ui::shell::run(&mut source, &mut console, display.as_ref())
}

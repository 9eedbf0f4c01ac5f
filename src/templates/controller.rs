use indoc::indoc;

use super::{
    application_import_path, application_service_name, controller_name,
    controller_package_name, fill, header, type_comment, Template,
};
use crate::{
    error::Result,
    http_rule::{HttpRuleDescriptor, Parameter},
    java_kind::field_imports,
    naming::{lcfirst, member_name, remove_duplicates, ucfirst},
    options::Options,
    schema::{File, Message, Service},
    string_builder::StringBuilder,
};

const CONTROLLER: &str = indoc! {r#"
    <header>

    <comment>@RestController
    public class <name> {

        private final <service> <variable>;

        public <name>(<service> <variable>) {
            this.<variable> = <variable>;
        }

    <handlers>
    }
"#};

const SPRING_IMPORTS: [&str; 1] = ["org.springframework.web.bind.annotation.*"];

/// A Spring REST controller exposing one service over HTTP.
#[derive(Debug)]
pub struct ControllerTemplate {
    pub package_name: String,
    pub controller_name: String,
    pub comment: String,
    pub service_name: String,
    pub service_variable_name: String,
    pub handlers: Vec<HttpRuleDescriptor>,
    pub imports: Vec<String>,
}

impl ControllerTemplate {
    pub fn new(file: &File, service: &Service, options: &Options) -> Result<Template> {
        let package_name = controller_package_name(file, options);
        let handlers = service
            .methods
            .iter()
            .map(HttpRuleDescriptor::new)
            .collect::<Result<Vec<_>>>()?;

        let mut imports = vec![application_import_path(file, service, options)];
        for method in &service.methods {
            imports.extend(message_imports(&method.input, &package_name));
            imports.extend(message_imports(&method.output, &package_name));
        }
        imports.extend(SPRING_IMPORTS.iter().map(|&import| import.to_owned()));

        let service_name = application_service_name(service);

        Ok(Template::Controller(ControllerTemplate {
            package_name,
            controller_name: controller_name(service),
            comment: service.comments.clone(),
            service_variable_name: lcfirst(&service_name),
            service_name,
            handlers,
            imports: remove_duplicates(imports),
        }))
    }

    pub fn render(&self) -> String {
        let header = header(&self.package_name, &self.imports);
        let comment = type_comment(&self.comment);
        let handlers = self.render_handlers();

        fill(
            CONTROLLER,
            &[
                ("<header>", header.as_str()),
                ("<comment>", comment.as_str()),
                ("<handlers>", handlers.as_str()),
                ("<name>", self.controller_name.as_str()),
                ("<service>", self.service_name.as_str()),
                ("<variable>", self.service_variable_name.as_str()),
            ],
        )
    }

    fn render_handlers(&self) -> String {
        let mut handlers = StringBuilder::with_depth(1);

        for (index, handler) in self.handlers.iter().enumerate() {
            if index > 0 {
                handlers.blank();
            }

            if handler.method.has_comment() {
                handlers.doc_comment(&handler.method.comment);
            }
            handlers.push(handler.mapping_annotation());

            let arguments = handler
                .params
                .iter()
                .map(|param| format!("{} {} {}", param.annotation, param.r#type, argument_name(param)))
                .collect::<Vec<_>>()
                .join(", ");
            handlers.push(format!(
                "public {} {}({arguments}) {{",
                handler.response_body.r#type, handler.method.name
            ));
            handlers.indent();

            let request = if handler.is_wildcard {
                let body = handler
                    .request_body
                    .as_ref()
                    .map_or_else(|| handler.request_message.name.clone(), argument_name);
                for param in &handler.path_params {
                    handlers.push(setter_call(&body, param));
                }
                body
            } else {
                let request = handler.request_message.name.clone();
                handlers.push(format!(
                    "{0} {request} = new {0}();",
                    handler.request_message.r#type
                ));
                for param in &handler.params {
                    handlers.push(setter_call(&request, param));
                }
                request
            };

            let call = format!(
                "this.{}.{}({request})",
                self.service_variable_name, handler.method.name
            );
            if handler.response_body.has_body {
                handlers.push(format!(
                    "return {call}.get{}();",
                    ucfirst(&member_name(&handler.response_body.name))
                ));
            } else {
                handlers.push(format!("return {call};"));
            }

            handlers.dedent();
            handlers.push("}");
        }

        handlers.build()
    }
}

/// The message's own class plus whatever its fields need.
fn message_imports(message: &Message, package: &str) -> Vec<String> {
    let mut imports = vec![message.import_path()];
    for field in &message.fields {
        imports.extend(field_imports(field, package));
    }
    imports
}

fn argument_name(param: &Parameter) -> String {
    member_name(&param.name)
}

fn setter_call(target: &str, param: &Parameter) -> String {
    let argument = argument_name(param);
    format!("{target}.set{}({argument});", ucfirst(&argument))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::{
        annotations::{http_rule::Pattern, HttpRule},
        error::GenerateError,
        schema::{Field, Kind, Method, TypeRef},
    };

    fn user_ref() -> Kind {
        Kind::Message(TypeRef {
            name: "User".to_owned(),
            full_name: "acme.User".to_owned(),
            java_package: "com.acme.dto".to_owned(),
        })
    }

    fn message(name: &str, fields: Vec<Field>) -> Message {
        Message {
            name: name.to_owned(),
            full_name: format!("acme.{name}"),
            file: "acme/users.proto".to_owned(),
            java_package: "com.acme.dto".to_owned(),
            fields,
            ..Default::default()
        }
    }

    fn method(name: &str, input: Message, output: Message, rule: HttpRule) -> Method {
        Method {
            name: name.to_owned(),
            full_name: format!("acme.UserService.{name}"),
            input,
            output,
            http_rule: Some(rule),
            ..Default::default()
        }
    }

    fn file() -> File {
        File {
            name: "acme/users.proto".to_owned(),
            java_package: "com.acme".to_owned(),
            ..Default::default()
        }
    }

    fn user() -> Message {
        message("User", vec![Field::new("id", Kind::String)])
    }

    fn get_user() -> Method {
        Method {
            comments: "Fetches one user.".to_owned(),
            ..method(
                "GetUser",
                message(
                    "GetUserRequest",
                    vec![
                        Field::new("user_id", Kind::String),
                        Field::new("fields", Kind::String).repeated(),
                    ],
                ),
                user(),
                HttpRule {
                    pattern: Some(Pattern::Get("/v1/users/{user_id}".to_owned())),
                    ..Default::default()
                },
            )
        }
    }

    fn controller(service: &Service) -> ControllerTemplate {
        match ControllerTemplate::new(&file(), service, &Options::default()) {
            Ok(Template::Controller(controller)) => controller,
            _ => unreachable!("services build controller templates"),
        }
    }

    #[test]
    fn renders_get_handler() {
        let service = Service {
            name: "UserService".to_owned(),
            full_name: "acme.UserService".to_owned(),
            methods: vec![get_user()],
            ..Default::default()
        };
        let template = ControllerTemplate::new(&file(), &service, &Options::default()).unwrap();

        assert_eq!(template.file_path(), "com/acme/controller/UserController.java");
        assert_eq!(
            template.render(),
            indoc! {r#"
                package com.acme.controller;

                import com.acme.service.UserService;
                import com.acme.dto.GetUserRequest;
                import java.util.List;
                import com.acme.dto.User;
                import org.springframework.web.bind.annotation.*;

                @RestController
                public class UserController {

                    private final UserService userService;

                    public UserController(UserService userService) {
                        this.userService = userService;
                    }

                    /**
                     * Fetches one user.
                     */
                    @GetMapping("/v1/users/{user_id}")
                    public User getUser(@PathVariable("user_id") String userId, @RequestParam(name = "fields") List<String> fields) {
                        GetUserRequest getUserRequest = new GetUserRequest();
                        getUserRequest.setUserId(userId);
                        getUserRequest.setFields(fields);
                        return this.userService.getUser(getUserRequest);
                    }
                }"#}
        );
    }

    #[test]
    fn wildcard_body_is_the_request() {
        let update_user = method(
            "UpdateUser",
            message(
                "UpdateUserRequest",
                vec![Field::new("id", Kind::String), Field::new("name", Kind::String)],
            ),
            user(),
            HttpRule {
                pattern: Some(Pattern::Patch("/v1/users/{id}".to_owned())),
                body: "*".to_owned(),
                ..Default::default()
            },
        );
        let service = Service {
            name: "Users".to_owned(),
            methods: vec![update_user],
            ..Default::default()
        };

        let rendered = controller(&service).render();
        assert!(rendered.contains(indoc! {r#"
            @PatchMapping("/v1/users/{id}")
                public User updateUser(@PathVariable("id") String id, @RequestBody UpdateUserRequest updateUserRequest) {
                    updateUserRequest.setId(id);
                    return this.usersService.updateUser(updateUserRequest);
                }"#}));
        assert!(rendered.contains("public class UsersController {"));
        assert!(rendered.contains("private final UsersService usersService;"));
    }

    #[test]
    fn named_bodies_are_set_and_unwrapped() {
        let create_user = method(
            "CreateUser",
            message(
                "CreateUserRequest",
                vec![Field::new("parent", Kind::String), Field::new("user", user_ref())],
            ),
            message("CreateUserResponse", vec![Field::new("user", user_ref())]),
            HttpRule {
                pattern: Some(Pattern::Post("/v1/{parent}/users".to_owned())),
                body: "user".to_owned(),
                response_body: "user".to_owned(),
                ..Default::default()
            },
        );
        let service = Service {
            name: "UserService".to_owned(),
            methods: vec![create_user],
            ..Default::default()
        };

        let rendered = controller(&service).render();
        assert!(rendered.contains(indoc! {r#"
            public User createUser(@PathVariable("parent") String parent, @RequestBody User user) {
                    CreateUserRequest createUserRequest = new CreateUserRequest();
                    createUserRequest.setParent(parent);
                    createUserRequest.setUser(user);
                    return this.userService.createUser(createUserRequest).getUser();
                }"#}));
    }

    #[test]
    fn imports_are_deduplicated() {
        let service = Service {
            name: "UserService".to_owned(),
            methods: vec![get_user(), get_user()],
            ..Default::default()
        };

        assert_eq!(
            controller(&service).imports,
            [
                "com.acme.service.UserService",
                "com.acme.dto.GetUserRequest",
                "java.util.List",
                "com.acme.dto.User",
                "org.springframework.web.bind.annotation.*",
            ]
        );
    }

    #[test]
    fn binding_errors_propagate() {
        let broken = method(
            "GetUser",
            message("GetUserRequest", Vec::new()),
            user(),
            HttpRule {
                pattern: Some(Pattern::Get("/v1/users/{id}".to_owned())),
                ..Default::default()
            },
        );
        let service = Service {
            name: "UserService".to_owned(),
            methods: vec![broken],
            ..Default::default()
        };

        assert!(matches!(
            ControllerTemplate::new(&file(), &service, &Options::default()),
            Err(GenerateError::PathParamNotFound { .. })
        ));
    }

    #[test]
    fn comments_keep_placeholder_like_text() {
        let get_shelf = Method {
            comments: "Resource name: shelves/<name>".to_owned(),
            ..get_user()
        };
        let service = Service {
            name: "ShelfService".to_owned(),
            comments: "Routes <handlers> for <service>.".to_owned(),
            methods: vec![get_shelf],
            ..Default::default()
        };

        let rendered = controller(&service).render();
        assert!(rendered.contains(" * Routes <handlers> for <service>.\n */\n@RestController\npublic class ShelfController {"));
        assert!(rendered.contains("     * Resource name: shelves/<name>\n     */\n    @GetMapping(\"/v1/users/{user_id}\")"));
        assert!(rendered.contains("    private final ShelfService shelfService;"));
    }
}

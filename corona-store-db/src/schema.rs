// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

//! Database schema definitions for the vaccine production store.

/// Entity and association tables.
pub const SCHEMA_SQL: &str = r#"
create table labs (
    id     integer primary key not null,
    name   text not null,
    city   text not null,
    active integer not null,
    constraint id_positive check (id > 0),
    constraint active_flag check (active in (0, 1))
) strict;

create table employees (
    id   integer primary key not null,
    name text not null,
    city text not null,
    constraint id_positive check (id > 0)
) strict;

create table vaccines (
    id           integer primary key not null,
    name         text not null,
    cost         integer not null,
    stock        integer not null,
    productivity integer not null,
    total_sales  integer not null default 0,
    constraint id_positive check (id > 0),
    constraint cost_nonnegative check (cost >= 0),
    constraint stock_nonnegative check (stock >= 0),
    constraint productivity_nonnegative check (productivity >= 0),
    constraint total_sales_nonnegative check (total_sales >= 0)
) strict;

create table employees_labs (
    employee_id integer not null,
    lab_id      integer not null,
    salary      integer not null,
    constraint salary_nonnegative check (salary >= 0),
    primary key (employee_id, lab_id),
    foreign key (employee_id) references employees(id) on delete cascade,
    foreign key (lab_id) references labs(id) on delete cascade
) strict;

create table vaccines_labs (
    vaccine_id integer not null,
    lab_id     integer not null,
    primary key (vaccine_id, lab_id),
    foreign key (vaccine_id) references vaccines(id) on delete cascade,
    foreign key (lab_id) references labs(id) on delete cascade
) strict;

create index if not exists IndexEmployeesLabsLab on employees_labs(lab_id);
create index if not exists IndexVaccinesLabsLab on vaccines_labs(lab_id);
"#;

/// Reporting views flattening the association tables with their parents.
pub const VIEWS_SQL: &str = r#"
create view if not exists vaccines_labs_view as
select v.id           as vaccine_id,
       l.id           as lab_id,
       v.name         as vaccine_name,
       v.cost         as vaccine_cost,
       v.productivity as vaccine_productivity,
       l.name         as lab_name,
       l.city         as lab_city,
       l.active       as is_lab_active
from vaccines v
join vaccines_labs vl on vl.vaccine_id = v.id
join labs l on l.id = vl.lab_id;

create view if not exists employees_labs_view as
select e.id     as employee_id,
       l.id     as lab_id,
       e.name   as employee_name,
       e.city   as employee_city,
       l.name   as lab_name,
       l.city   as lab_city,
       l.active as is_lab_active
from employees e
join employees_labs el on el.employee_id = e.id
join labs l on l.id = el.lab_id;
"#;

/// Removes every row, associations first.
pub const CLEAR_SQL: &str = r#"
delete from employees_labs;
delete from vaccines_labs;
delete from labs;
delete from employees;
delete from vaccines;
"#;

/// Drops views and tables in dependency order.
pub const DROP_SQL: &str = r#"
drop view vaccines_labs_view;
drop view employees_labs_view;
drop table employees_labs;
drop table vaccines_labs;
drop table labs;
drop table employees;
drop table vaccines;
"#;

/// Names of every schema object, used to check whether the schema is present.
pub const TABLES: [&str; 5] = [
    "labs",
    "employees",
    "vaccines",
    "employees_labs",
    "vaccines_labs",
];
pub const VIEWS: [&str; 2] = ["vaccines_labs_view", "employees_labs_view"];
